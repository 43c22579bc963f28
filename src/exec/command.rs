// src/exec/command.rs

//! Shell-command execution unit.

use std::collections::HashMap;
use std::process::Stdio;

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::model::ConfigFile;
use crate::dag::VertexId;
use crate::exec::backend::{Attempt, ExecFuture, Executor, Outcome};

/// Runs one shell command per vertex; exit status 0 passes.
///
/// stdout and stderr are drained line by line into `debug!` events so that
/// pipes never fill up.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    commands: HashMap<VertexId, String>,
}

impl CommandExecutor {
    pub fn new(commands: HashMap<VertexId, String>) -> Self {
        Self { commands }
    }

    /// Collect the `cmd` of every vertex in a validated config.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let commands = cfg
            .vertex
            .iter()
            .filter_map(|(name, vc)| vc.cmd.clone().map(|cmd| (name.clone(), cmd)))
            .collect();
        Self { commands }
    }

    pub fn with_command(mut self, vertex: impl Into<VertexId>, cmd: impl Into<String>) -> Self {
        self.commands.insert(vertex.into(), cmd.into());
        self
    }

    pub fn command_for(&self, vertex: &str) -> Option<&str> {
        self.commands.get(vertex).map(|s| s.as_str())
    }
}

impl Executor for CommandExecutor {
    fn execute(&self, attempt: Attempt) -> ExecFuture<'_> {
        Box::pin(async move {
            let cmd = self
                .command_for(&attempt.vertex)
                .ok_or_else(|| anyhow!("no command configured for vertex '{}'", attempt.vertex))?;
            run_command(&attempt, cmd).await
        })
    }
}

async fn run_command(attempt: &Attempt, cmd: &str) -> Result<Outcome> {
    info!(
        vertex = %attempt.vertex,
        wave = attempt.wave,
        attempt = attempt.index,
        cmd = %cmd,
        "starting vertex process"
    );

    // Build a shell command appropriate for the platform.
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning process for vertex '{}'", attempt.vertex))?;

    if let Some(stdout) = child.stdout.take() {
        let vertex = attempt.vertex.clone();
        let index = attempt.index;
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(vertex = %vertex, attempt = index, "stdout: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        let vertex = attempt.vertex.clone();
        let index = attempt.index;
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(vertex = %vertex, attempt = index, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of vertex '{}'", attempt.vertex))?;

    let code = status.code().unwrap_or(-1);
    info!(
        vertex = %attempt.vertex,
        wave = attempt.wave,
        attempt = attempt.index,
        exit_code = code,
        success = status.success(),
        "vertex process exited"
    );

    Ok(if status.success() {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}
