// src/errors.rs

//! Crate-wide error type.
//!
//! Precondition violations (mutating a started graph, inserting a cyclic
//! edge, running a failed graph) are returned as values so that embedding
//! callers can recover. Task failures are not errors; they are recorded as
//! [`Status::Failed`](crate::dag::Status) on the graph.

use thiserror::Error;

use crate::dag::VertexId;

#[derive(Error, Debug)]
pub enum WavedagError {
    #[error("cannot {operation}: graph has already started")]
    GraphStarted { operation: &'static str },

    #[error("cannot add cyclic edge {from} -> {to}")]
    CycleDetected { from: VertexId, to: VertexId },

    #[error("unknown vertex: {0}")]
    UnknownVertex(VertexId),

    #[error("graph has failed")]
    AlreadyFailed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cycle detected in graph: {0}")]
    DagCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WavedagError>;
