// src/exec/backend.rs

//! Pluggable execution-unit abstraction.
//!
//! The wave scheduler hands every attempt to an [`Executor`] and records
//! whatever [`Outcome`] comes back. It never looks at what the attempt did.
//!
//! - [`CommandExecutor`](super::CommandExecutor) runs a shell command per
//!   vertex and is what the `wavedag` binary uses by default.
//! - [`CoinFlipExecutor`](super::CoinFlipExecutor) does no work and passes
//!   or fails at random.
//! - Tests provide their own scripted implementations.

use std::future::Future;
use std::pin::Pin;

use crate::dag::VertexId;

/// Result of one execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

/// One dispatched execution attempt of a vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub vertex: VertexId,
    /// Zero-based index among the vertex's concurrent attempts in this wave.
    pub index: usize,
    /// Total attempts dispatched for the vertex in this wave.
    pub repetitions: usize,
    /// One-based wave number within the run.
    pub wave: u64,
}

pub type ExecFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Outcome>> + Send + 'a>>;

/// The unit of work performed per vertex attempt.
///
/// Implementations may be invoked concurrently, and several times for the
/// same vertex in one wave. They must not touch graph topology, and they
/// are always awaited to completion: there is no cancellation. An `Err` is
/// recorded as a failure of the vertex.
pub trait Executor: Send + Sync + 'static {
    fn execute(&self, attempt: Attempt) -> ExecFuture<'_>;
}
