// src/engine/mod.rs

//! Wave scheduling engine.
//!
//! The control loop lives in [`scheduler`]; fan-out and the per-wave
//! barrier live in [`wave`].

use crate::dag::{Status, VertexId};

/// What one wave dispatched and how it went.
///
/// Diagnostic only: vertex and run statuses on the graph are authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveReport {
    /// One-based wave number.
    pub wave: u64,
    /// Vertices dispatched in this wave, in id order.
    pub vertices: Vec<VertexId>,
    /// Total attempts spawned (sum of repetitions).
    pub attempts: usize,
    /// Attempts whose outcome was `Failed`.
    pub failed_attempts: usize,
    /// Attempts whose outcome was dropped because the run had already
    /// failed.
    pub dropped_writes: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub status: Status,
    pub waves: Vec<WaveReport>,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }

    /// Vertex ids in the order they were dispatched.
    pub fn dispatch_order(&self) -> Vec<VertexId> {
        self.waves
            .iter()
            .flat_map(|w| w.vertices.iter().cloned())
            .collect()
    }
}

pub mod scheduler;
pub mod wave;

pub use scheduler::WaveScheduler;
