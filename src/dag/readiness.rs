// src/dag/readiness.rs

//! Readiness computation: which vertices may run now.
//!
//! A vertex is ready when it is still `Pending` and every parent has left
//! `Pending`. A failed parent counts as resolved; only a run-wide failure
//! stops progress.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::dag::graph::Dag;
use crate::dag::status::{BoardState, Status};
use crate::dag::vertex::VertexId;
use crate::errors::{Result, WavedagError};

impl Dag {
    /// Whether `id` is ready to run. Unknown ids are never ready.
    pub fn can_execute(&self, id: &str) -> bool {
        let state = self.board.lock();
        self.ready_in(&state, id)
    }

    /// Compute the next wave: the ids of every ready vertex, sorted
    /// lexicographically.
    ///
    /// Freezes topology on first call. Errors with
    /// [`WavedagError::AlreadyFailed`] once the run has failed. All statuses
    /// are read from one snapshot under the graph-wide lock.
    pub fn next_wave(&mut self) -> Result<Vec<VertexId>> {
        self.start();

        let state = self.board.lock();
        if state.run == Status::Failed {
            return Err(WavedagError::AlreadyFailed);
        }

        // `vertices` is a BTreeMap, so this is already in id order.
        let ready: Vec<VertexId> = self
            .vertices
            .keys()
            .filter(|id| self.ready_in(&state, id))
            .cloned()
            .collect();

        debug!(?ready, "computed ready set");
        Ok(ready)
    }

    /// Dependency levels of the graph assuming every vertex resolves: the
    /// sequence of waves a run would dispatch if nothing aborted it.
    ///
    /// Pure; does not start the graph or read statuses.
    pub fn levels(&self) -> Vec<Vec<VertexId>> {
        let mut remaining: HashMap<&str, usize> = self
            .vertices
            .keys()
            .map(|id| (id.as_str(), self.parents_of(id).len()))
            .collect();
        let mut frontier: BTreeSet<&str> = remaining
            .iter()
            .filter(|(_, n)| **n == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut levels = Vec::new();

        while !frontier.is_empty() {
            let mut next = BTreeSet::new();
            for id in frontier.iter() {
                remaining.remove(id);
                for child in self.children_of(id) {
                    if let Some(n) = remaining.get_mut(child.as_str()) {
                        *n -= 1;
                        if *n == 0 {
                            next.insert(child.as_str());
                        }
                    }
                }
            }
            levels.push(frontier.iter().map(|id| id.to_string()).collect());
            frontier = next;
        }

        levels
    }

    fn ready_in(&self, state: &BoardState, id: &str) -> bool {
        if state.vertices.get(id) != Some(&Status::Pending) {
            return false;
        }
        self.parents_of(id).iter().all(|parent| {
            matches!(state.vertices.get(parent), Some(s) if s.is_terminal())
        })
    }
}
