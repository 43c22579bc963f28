// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::model::ConfigFile;
use crate::dag::status::{AbortHandle, Status, StatusBoard};
use crate::dag::vertex::{Vertex, VertexHandle, VertexId};
use crate::errors::{Result, WavedagError};

/// Directed acyclic graph of vertices plus the shared run status.
///
/// Topology is built with [`Dag::add_vertex`] and [`Dag::add_edge`] and is
/// frozen as soon as the graph starts (explicitly via [`Dag::start`] or by
/// the first readiness computation). After that, adjacency is read-only and
/// traversed without locking; only statuses change, and those live behind
/// the graph-wide [`StatusBoard`].
#[derive(Debug)]
pub struct Dag {
    pub(super) vertices: BTreeMap<VertexId, Vertex>,
    /// Direct parents: vertices that must resolve before this one can run.
    pub(super) parents: HashMap<VertexId, Vec<VertexId>>,
    /// Direct children: vertices that depend on this one.
    pub(super) children: HashMap<VertexId, Vec<VertexId>>,
    pub(super) board: Arc<StatusBoard>,
    pub(super) started: bool,
}

impl Default for Dag {
    fn default() -> Self {
        Self::new()
    }
}

impl Dag {
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            board: Arc::new(StatusBoard::new()),
            started: false,
        }
    }

    /// Build a graph from a validated [`ConfigFile`].
    ///
    /// Every vertex is registered first, then every `after` entry becomes an
    /// edge `dep -> vertex` through the normal [`Dag::add_edge`] path.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut dag = Self::new();
        let default_repetitions = cfg.default.repetitions.unwrap_or(1);
        let default_can_fail = cfg.default.can_fail.unwrap_or(false);

        for (name, vc) in cfg.vertex.iter() {
            dag.add_vertex(
                Vertex::new(name.clone())
                    .repetitions(vc.effective_repetitions(default_repetitions))
                    .can_fail(vc.effective_can_fail(default_can_fail)),
            )?;
        }

        for (name, vc) in cfg.vertex.iter() {
            for dep in vc.after.iter() {
                dag.add_edge(dep, name)?;
            }
        }

        Ok(dag)
    }

    /// Register a vertex under its id.
    ///
    /// Re-adding an existing id replaces the vertex (its status goes back to
    /// `Pending`; edges already attached to the id are kept). Handles issued
    /// for the old vertex follow the replacement's fail policy.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexHandle> {
        if self.started {
            return Err(WavedagError::GraphStarted {
                operation: "add vertex",
            });
        }

        if self.vertices.contains_key(vertex.id()) {
            warn!(vertex = %vertex.id(), "vertex id already registered; overwriting");
        }

        self.board
            .register(&vertex.id().to_string(), vertex.may_fail());
        let handle = VertexHandle::new(&vertex, Arc::clone(&self.board));
        self.vertices.insert(vertex.id().to_string(), vertex);
        Ok(handle)
    }

    /// Add a dependency edge: `to` depends on `from`.
    ///
    /// Rejected without touching adjacency when the graph has started, when
    /// either endpoint is unknown, or when `from` is already reachable from
    /// `to` (the edge would close a cycle).
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        if self.started {
            return Err(WavedagError::GraphStarted {
                operation: "add edge",
            });
        }

        for id in [from, to] {
            if !self.vertices.contains_key(id) {
                return Err(WavedagError::UnknownVertex(id.to_string()));
            }
        }

        if self.is_cyclic(from, to) {
            return Err(WavedagError::CycleDetected {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.parents
            .entry(to.to_string())
            .or_default()
            .push(from.to_string());
        self.children
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());

        debug!(from = %from, to = %to, "edge added");
        Ok(())
    }

    /// Whether adding `from -> to` would close a cycle, i.e. whether `from`
    /// is reachable from `to` along existing child edges.
    ///
    /// A self-edge counts as a cycle.
    pub fn is_cyclic(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }

        let mut stack: Vec<&str> = vec![to];
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            for child in self.children_of(node) {
                if child == from {
                    return true;
                }
                stack.push(child.as_str());
            }
        }

        false
    }

    /// Freeze topology. Idempotent.
    pub fn start(&mut self) {
        if !self.started {
            debug!(vertices = self.vertices.len(), "graph started; topology frozen");
            self.started = true;
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Fail the run from outside (Pending -> Failed). Any attempts still in
    /// flight stop being able to record their outcomes.
    pub fn abort(&self) -> Status {
        self.abort_handle().abort()
    }

    /// Handle that can abort this graph's run from another task.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle::new(Arc::clone(&self.board))
    }

    /// Pending -> Passed, used by the scheduler when a wave finds nothing
    /// left to do. A run that has already failed stays failed.
    pub(crate) fn declare_passed(&self) -> Status {
        self.board.declare_passed()
    }

    /// Overall run status.
    pub fn status(&self) -> Status {
        self.board.run_status()
    }

    pub fn has_failed(&self) -> bool {
        self.status() == Status::Failed
    }

    pub fn has_succeeded(&self) -> bool {
        self.status() == Status::Passed
    }

    /// `has_failed() || has_succeeded()`, from a single read.
    pub fn has_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Number of registered vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Handle for a registered vertex.
    pub fn vertex(&self, id: &str) -> Option<VertexHandle> {
        let vertex = self.vertices.get(id)?;
        Some(VertexHandle::new(vertex, Arc::clone(&self.board)))
    }

    /// All vertex ids, in lexicographic order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(|s| s.as_str())
    }

    /// Immediate parents of a vertex, in edge insertion order.
    pub fn parents_of(&self, id: &str) -> &[VertexId] {
        self.parents.get(id).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Immediate children of a vertex, in edge insertion order.
    pub fn children_of(&self, id: &str) -> &[VertexId] {
        self.children.get(id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Vertices with no parents.
    pub fn roots(&self) -> Vec<&str> {
        self.vertex_ids()
            .filter(|id| self.parents_of(id).is_empty())
            .collect()
    }

    /// Every edge as `(from, to)`, ordered by `from` then insertion order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.vertex_ids()
            .flat_map(|from| {
                self.children_of(from)
                    .iter()
                    .map(move |to| (from, to.as_str()))
            })
            .collect()
    }

    pub fn status_of(&self, id: &str) -> Option<Status> {
        self.board.status_of(id)
    }

    /// Snapshot of every vertex status, taken under one lock acquisition.
    pub fn statuses(&self) -> BTreeMap<VertexId, Status> {
        let state = self.board.lock();
        let snapshot = state
            .vertices
            .iter()
            .map(|(id, status)| (id.clone(), *status))
            .collect();
        snapshot
    }

    /// Log the state of every vertex.
    pub fn report_states(&self) {
        for id in self.vertex_ids() {
            if let Some(handle) = self.vertex(id) {
                handle.report_state();
            }
        }
    }
}
