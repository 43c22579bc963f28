// src/exec/coin_flip.rs

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::exec::backend::{Attempt, ExecFuture, Executor, Outcome};

/// Stand-in execution unit that does no work: an attempt passes when the
/// wall clock's sub-second nanoseconds are even.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlipExecutor;

impl Executor for CoinFlipExecutor {
    fn execute(&self, attempt: Attempt) -> ExecFuture<'_> {
        Box::pin(async move {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(0);
            let outcome = if nanos % 2 == 0 {
                Outcome::Passed
            } else {
                Outcome::Failed
            };
            debug!(vertex = %attempt.vertex, attempt = attempt.index, ?outcome, "coin flipped");
            Ok(outcome)
        })
    }
}
