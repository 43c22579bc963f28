// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::ExecutorKind;

/// Command-line arguments for `wavedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wavedag",
    version,
    about = "Run a dependency graph of tasks in concurrent waves.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph definition (TOML). Defaults to `Wavedag.toml` in
    /// the current directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Execution unit to use; overrides `[config].executor`.
    #[arg(long, value_enum, value_name = "KIND")]
    pub executor: Option<ExecutorArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAVEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the graph and its waves, but don't run it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Executor selection as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ExecutorArg {
    Command,
    CoinFlip,
}

impl From<ExecutorArg> for ExecutorKind {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Command => ExecutorKind::Command,
            ExecutorArg::CoinFlip => ExecutorKind::CoinFlip,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
