// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::{default_config_path, load_from_path};
use crate::config::model::ConfigFile;
use crate::dag::{Dag, Status};
use crate::engine::{RunSummary, WaveScheduler};
use crate::exec::{CoinFlipExecutor, CommandExecutor, Executor};
use crate::types::ExecutorKind;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the graph definition, builds the [`Dag`], runs it
/// with the selected executor, and prints a short report. Returns the
/// terminal run status (`Pending` for a dry run).
pub async fn run(args: CliArgs) -> Result<Status> {
    let config_path = args.config.unwrap_or_else(default_config_path);
    let mut raw = load_from_path(&config_path)?;

    // The CLI flag wins over `[config].executor`, and must be applied before
    // validation because it decides whether `cmd` is mandatory.
    if let Some(kind) = args.executor {
        raw.config.executor = kind.into();
    }
    let cfg = ConfigFile::try_from(raw)?;

    let mut dag = Dag::from_config(&cfg)?;

    if args.dry_run {
        print_dry_run(&cfg, &dag);
        return Ok(Status::Pending);
    }

    info!(
        config = %config_path.display(),
        executor = ?cfg.config.executor,
        vertices = dag.len(),
        "running graph"
    );

    let summary = match cfg.config.executor {
        ExecutorKind::Command => {
            execute(&mut dag, CommandExecutor::from_config(&cfg)).await?
        }
        ExecutorKind::CoinFlip => execute(&mut dag, CoinFlipExecutor).await?,
    };

    dag.report_states();
    print_report(&dag, &summary);
    Ok(summary.status)
}

async fn execute<E: Executor>(dag: &mut Dag, executor: E) -> Result<RunSummary> {
    let scheduler = WaveScheduler::new(executor);
    Ok(scheduler.run(dag).await?)
}

fn print_report(dag: &Dag, summary: &RunSummary) {
    for (id, status) in dag.statuses() {
        println!("  {id}: {status}");
    }
    println!("waves: {}", summary.waves.len());

    if dag.has_failed() {
        println!("graph failed.");
    } else if dag.has_succeeded() {
        println!("graph passed.");
    }
}

/// Dry-run output: vertices, edges and the waves a clean run would dispatch.
fn print_dry_run(cfg: &ConfigFile, dag: &Dag) {
    println!("wavedag dry-run");
    println!("  config.executor = {:?}", cfg.config.executor);
    println!();

    println!("vertices ({}):", dag.len());
    for id in dag.vertex_ids() {
        let Some(vertex) = dag.get(id) else { continue };
        println!("  - {id}");
        if let Some(cmd) = cfg.vertex.get(id).and_then(|vc| vc.cmd.as_deref()) {
            println!("      cmd: {cmd}");
        }
        if !dag.parents_of(id).is_empty() {
            println!("      after: {:?}", dag.parents_of(id));
        }
        if vertex.repetition_count() > 1 {
            println!("      repetitions: {}", vertex.repetition_count());
        }
        if vertex.may_fail() {
            println!("      can_fail: true");
        }
    }
    println!();

    println!("waves:");
    for (i, level) in dag.levels().iter().enumerate() {
        println!("  {}: {:?}", i + 1, level);
    }

    debug!("dry-run complete (no execution)");
}
