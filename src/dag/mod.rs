// src/dag/mod.rs

//! Graph data model, construction, and readiness.
//!
//! - [`vertex`] describes task nodes and the handles attempts use to record
//!   outcomes.
//! - [`status`] holds the status enum and the graph-wide status lock.
//! - [`graph`] owns vertices and adjacency, and rejects cyclic edges.
//! - [`readiness`] computes the set of vertices that may run now.

pub mod graph;
pub mod readiness;
pub mod status;
pub mod vertex;

pub use graph::Dag;
pub use status::{AbortHandle, Status, StatusBoard};
pub use vertex::{Vertex, VertexHandle, VertexId};
