// src/engine/scheduler.rs

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::dag::{Dag, Status};
use crate::engine::wave::dispatch_wave;
use crate::engine::RunSummary;
use crate::errors::{Result, WavedagError};
use crate::exec::Executor;

/// Drives a [`Dag`] to a terminal status, one wave at a time.
///
/// Each iteration computes the ready set, dispatches every repetition of
/// every ready vertex concurrently on the Tokio runtime, and waits for the
/// whole wave before looking at statuses again. There is no overlap
/// between waves.
pub struct WaveScheduler<E: Executor> {
    executor: Arc<E>,
}

impl<E: Executor> fmt::Debug for WaveScheduler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveScheduler").finish_non_exhaustive()
    }
}

impl<E: Executor> WaveScheduler<E> {
    pub fn new(executor: E) -> Self {
        Self::from_arc(Arc::new(executor))
    }

    pub fn from_arc(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Run the graph until it passes or fails.
    ///
    /// The run passes exactly when a wave finds nothing ready and no
    /// failure has been declared. It fails when a vertex that cannot fail
    /// reports a failure, or when the embedder calls [`Dag::abort`]. Running
    /// a graph that has already failed is an error; running one that has
    /// already passed returns immediately.
    pub async fn run(&self, dag: &mut Dag) -> Result<RunSummary> {
        if dag.has_failed() {
            return Err(WavedagError::AlreadyFailed);
        }

        info!(vertices = dag.len(), "wave scheduler started");

        let mut waves = Vec::new();
        let mut wave: u64 = 0;

        while !dag.has_finished() {
            let ready = match dag.next_wave() {
                Ok(ready) => ready,
                // Aborted between the status check and the readiness read.
                Err(WavedagError::AlreadyFailed) => break,
                Err(e) => return Err(e),
            };

            if ready.is_empty() {
                let status = dag.declare_passed();
                debug!(%status, "no vertex ready; declaring run finished");
                break;
            }

            wave += 1;
            info!(wave, vertices = ?ready, "dispatching wave");
            let report = dispatch_wave(&self.executor, dag, wave, &ready).await;
            debug!(
                wave,
                failed_attempts = report.failed_attempts,
                dropped_writes = report.dropped_writes,
                "wave finished"
            );
            waves.push(report);
        }

        let status = dag.status();
        if status == Status::Passed {
            info!(waves = waves.len(), "graph passed");
        } else {
            info!(waves = waves.len(), %status, "graph did not pass");
        }

        Ok(RunSummary { status, waves })
    }
}
