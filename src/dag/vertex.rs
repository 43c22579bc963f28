// src/dag/vertex.rs

//! Vertex description and the per-vertex handle used during a run.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::dag::status::{Status, StatusBoard};
use crate::exec::Outcome;

/// Canonical vertex identifier type.
pub type VertexId = String;

/// Build-time description of a task node.
///
/// ```
/// use wavedag::dag::Vertex;
///
/// let v = Vertex::new("compile").repetitions(3).can_fail(true);
/// assert_eq!(v.id(), "compile");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    repetitions: usize,
    can_fail: bool,
}

impl Vertex {
    /// A vertex with one repetition that is not allowed to fail.
    pub fn new(id: impl Into<VertexId>) -> Self {
        Self {
            id: id.into(),
            repetitions: 1,
            can_fail: false,
        }
    }

    /// Number of concurrent attempts dispatched when the vertex becomes
    /// ready. Clamped to at least 1.
    pub fn repetitions(mut self, n: usize) -> Self {
        self.repetitions = n.max(1);
        self
    }

    /// Whether a failure of this vertex is absorbed (`true`) or aborts the
    /// whole run (`false`).
    pub fn can_fail(mut self, can_fail: bool) -> Self {
        self.can_fail = can_fail;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn repetition_count(&self) -> usize {
        self.repetitions
    }

    pub fn may_fail(&self) -> bool {
        self.can_fail
    }
}

/// A registered vertex together with a reference to its graph's status
/// lock.
///
/// Handles are cheap to clone and are what each execution attempt holds on
/// to while it runs. The graph keeps ownership of the vertex table; a handle
/// only reaches the shared [`StatusBoard`], which also holds the fail policy
/// of whichever vertex is registered under the id.
#[derive(Debug, Clone)]
pub struct VertexHandle {
    id: VertexId,
    board: Arc<StatusBoard>,
}

impl VertexHandle {
    pub(crate) fn new(vertex: &Vertex, board: Arc<StatusBoard>) -> Self {
        Self {
            id: vertex.id.clone(),
            board,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn can_fail(&self) -> bool {
        self.board.can_fail(&self.id)
    }

    /// Current status, read under the graph-wide lock.
    pub fn status(&self) -> Status {
        self.board.status_of(&self.id).unwrap_or(Status::Pending)
    }

    /// Set this vertex to `Passed` unless the run has already failed.
    pub fn mark_passed(&self) -> bool {
        self.board.mark_passed(&self.id)
    }

    /// Set this vertex to `Failed` unless the run has already failed.
    /// Escalates to a run-wide failure when the vertex cannot fail.
    pub fn mark_failed(&self) -> bool {
        self.board.mark_failed(&self.id)
    }

    pub fn record(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Passed => self.mark_passed(),
            Outcome::Failed => self.mark_failed(),
        }
    }

    /// Diagnostics hook: emit the vertex's current state as a log event.
    pub fn report_state(&self) {
        info!(vertex = %self.id, status = %self.status(), "vertex state");
    }
}

impl fmt::Display for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex {} is in state: {}", self.id, self.status())
    }
}
