// src/exec/mod.rs

//! Execution units: what actually happens when a vertex attempt runs.
//!
//! - [`backend`] defines the [`Executor`] trait the wave scheduler talks to,
//!   plus [`Attempt`] and [`Outcome`].
//! - [`command`] runs a shell command per vertex with `tokio::process`.
//! - [`coin_flip`] passes or fails at random without doing any work.

pub mod backend;
pub mod coin_flip;
pub mod command;

pub use backend::{Attempt, ExecFuture, Executor, Outcome};
pub use coin_flip::CoinFlipExecutor;
pub use command::CommandExecutor;
