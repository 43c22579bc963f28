// src/dag/status.rs

//! Shared run status and the graph-wide status lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::dag::vertex::VertexId;

/// Status of a single vertex, and of a whole run.
///
/// `Pending` is the only non-terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Passed,
    Failed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Pending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Pending => "Pending",
            Status::Passed => "Passed",
            Status::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// Everything guarded by the graph-wide lock.
#[derive(Debug, Clone)]
pub(crate) struct BoardState {
    pub(crate) run: Status,
    pub(crate) vertices: HashMap<VertexId, Status>,
    /// Fail policy of the vertex currently registered under each id.
    pub(crate) can_fail: HashMap<VertexId, bool>,
}

/// Single mutex over the run status and every vertex status of one graph.
///
/// All status writes across all vertices serialize here, so a fail-fast
/// escalation can never interleave with a concurrent pass being recorded.
/// Reads taken by the readiness engine go through the same lock.
#[derive(Debug)]
pub struct StatusBoard {
    inner: Mutex<BoardState>,
}

impl StatusBoard {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(BoardState {
                run: Status::Pending,
                vertices: HashMap::new(),
                can_fail: HashMap::new(),
            }),
        }
    }

    /// Poisoning is ignored: no critical section can leave the state
    /// half-written.
    pub(crate) fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn register(&self, id: &VertexId, can_fail: bool) {
        let mut state = self.lock();
        state.vertices.insert(id.clone(), Status::Pending);
        state.can_fail.insert(id.clone(), can_fail);
    }

    /// Current overall run status.
    pub fn run_status(&self) -> Status {
        self.lock().run
    }

    /// Fail policy of the vertex registered under `id`. Unknown ids cannot
    /// fail.
    pub fn can_fail(&self, id: &str) -> bool {
        self.lock().can_fail.get(id).copied().unwrap_or(false)
    }

    /// Current status of one vertex, if registered.
    pub fn status_of(&self, id: &str) -> Option<Status> {
        self.lock().vertices.get(id).copied()
    }

    /// Record a pass for `id`.
    ///
    /// Returns `false` (and writes nothing) once the run has failed.
    pub fn mark_passed(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.run == Status::Failed {
            debug!(vertex = %id, "run already failed; dropping pass");
            return false;
        }
        match state.vertices.get_mut(id) {
            Some(status) => {
                *status = Status::Passed;
                true
            }
            None => false,
        }
    }

    /// Record a failure for `id`, escalating to a run-wide failure when the
    /// vertex currently registered under `id` is not allowed to fail.
    ///
    /// Returns `false` (and writes nothing) once the run has failed.
    pub fn mark_failed(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.run == Status::Failed {
            debug!(vertex = %id, "run already failed; dropping failure");
            return false;
        }
        match state.vertices.get_mut(id) {
            Some(status) => *status = Status::Failed,
            None => return false,
        }
        if !state.can_fail.get(id).copied().unwrap_or(false) {
            warn!(vertex = %id, "vertex failed, but it cannot fail; aborting run");
            state.run = Status::Failed;
        }
        true
    }

    /// Pending -> Passed. No-op on a terminal run.
    pub(crate) fn declare_passed(&self) -> Status {
        let mut state = self.lock();
        if state.run == Status::Pending {
            state.run = Status::Passed;
        }
        state.run
    }

    /// Pending -> Failed. No-op on a terminal run.
    pub(crate) fn declare_failed(&self) -> Status {
        let mut state = self.lock();
        if state.run == Status::Pending {
            state.run = Status::Failed;
        }
        state.run
    }
}

/// Lets code outside the scheduler fail a run that is in progress.
///
/// Obtained from [`Dag::abort_handle`](crate::dag::Dag::abort_handle); it
/// stays valid while the graph is mutably borrowed by a running scheduler.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    board: Arc<StatusBoard>,
}

impl AbortHandle {
    pub(crate) fn new(board: Arc<StatusBoard>) -> Self {
        Self { board }
    }

    /// Pending -> Failed. Returns the run status after the call.
    pub fn abort(&self) -> Status {
        warn!("run aborted by embedder");
        self.board.declare_failed()
    }

    pub fn status(&self) -> Status {
        self.board.run_status()
    }
}
