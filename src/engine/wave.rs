// src/engine/wave.rs

//! Dispatch of a single wave and its barrier.

use std::sync::Arc;

use tracing::{debug, error};

use crate::dag::{Dag, VertexHandle, VertexId};
use crate::engine::WaveReport;
use crate::exec::{Attempt, Executor, Outcome};

/// Spawn every attempt of every ready vertex, then wait for all of them.
///
/// Each attempt records its own outcome as soon as it finishes, so a
/// fail-fast escalation is visible to the rest of the wave immediately.
/// Nothing is cancelled: the wave always runs to completion.
pub(crate) async fn dispatch_wave<E: Executor>(
    executor: &Arc<E>,
    dag: &Dag,
    wave: u64,
    ready: &[VertexId],
) -> WaveReport {
    let mut inflight = Vec::new();

    for id in ready {
        let (Some(vertex), Some(handle)) = (dag.get(id), dag.vertex(id)) else {
            continue;
        };
        let repetitions = vertex.repetition_count();

        for index in 0..repetitions {
            let attempt = Attempt {
                vertex: id.clone(),
                index,
                repetitions,
                wave,
            };
            let join = tokio::spawn(run_attempt(
                Arc::clone(executor),
                handle.clone(),
                attempt,
            ));
            inflight.push((handle.clone(), join));
        }
    }

    let mut report = WaveReport {
        wave,
        vertices: ready.to_vec(),
        attempts: inflight.len(),
        failed_attempts: 0,
        dropped_writes: 0,
    };

    debug!(wave, attempts = report.attempts, "wave dispatched; waiting at barrier");

    for (handle, join) in inflight {
        let (outcome, recorded) = match join.await {
            Ok(result) => result,
            Err(err) => {
                error!(
                    vertex = %handle.id(),
                    wave,
                    error = %err,
                    "attempt did not complete; recording failure"
                );
                (Outcome::Failed, handle.mark_failed())
            }
        };
        if outcome == Outcome::Failed {
            report.failed_attempts += 1;
        }
        if !recorded {
            report.dropped_writes += 1;
        }
    }

    report
}

async fn run_attempt<E: Executor>(
    executor: Arc<E>,
    handle: VertexHandle,
    attempt: Attempt,
) -> (Outcome, bool) {
    let index = attempt.index;
    let wave = attempt.wave;

    let outcome = match executor.execute(attempt).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(
                vertex = %handle.id(),
                wave,
                attempt = index,
                error = %err,
                "execution error"
            );
            Outcome::Failed
        }
    };

    let recorded = handle.record(outcome);
    debug!(
        vertex = %handle.id(),
        wave,
        attempt = index,
        ?outcome,
        recorded,
        "attempt finished"
    );

    (outcome, recorded)
}
