use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wavedag::exec::{Attempt, ExecFuture, Executor, Outcome};

/// What a scripted attempt does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pass,
    Fail,
    /// Return an execution error instead of an outcome.
    Error,
    Panic,
}

/// Something observed by the executor, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started { wave: u64, vertex: String, index: usize },
    Finished { wave: u64, vertex: String, index: usize },
}

#[derive(Debug, Default)]
struct Shared {
    events: Mutex<Vec<Event>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// A fake executor that:
/// - follows a per-vertex, per-attempt script (default: pass immediately)
/// - optionally sleeps before answering
/// - records start/finish events and peak concurrency.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    script: HashMap<(String, usize), (Step, Duration)>,
    fallback: HashMap<String, Step>,
    shared: Arc<Shared>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every attempt of `vertex` does `step`, unless a more specific
    /// `attempt` entry exists.
    pub fn vertex(mut self, vertex: &str, step: Step) -> Self {
        self.fallback.insert(vertex.to_string(), step);
        self
    }

    /// Attempt `index` of `vertex` sleeps for `delay`, then does `step`.
    pub fn attempt(mut self, vertex: &str, index: usize, step: Step, delay: Duration) -> Self {
        self.script.insert((vertex.to_string(), index), (step, delay));
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.events.lock().unwrap().clone()
    }

    /// Vertex ids in the order their attempts started.
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Started { vertex, .. } => Some(vertex),
                Event::Finished { .. } => None,
            })
            .collect()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.shared.peak.load(Ordering::SeqCst)
    }

    fn plan(&self, attempt: &Attempt) -> (Step, Duration) {
        if let Some(planned) = self.script.get(&(attempt.vertex.clone(), attempt.index)) {
            return *planned;
        }
        let step = self
            .fallback
            .get(&attempt.vertex)
            .copied()
            .unwrap_or(Step::Pass);
        (step, Duration::ZERO)
    }
}

impl Executor for ScriptedExecutor {
    fn execute(&self, attempt: Attempt) -> ExecFuture<'_> {
        let (step, delay) = self.plan(&attempt);
        let shared = Arc::clone(&self.shared);

        Box::pin(async move {
            shared.events.lock().unwrap().push(Event::Started {
                wave: attempt.wave,
                vertex: attempt.vertex.clone(),
                index: attempt.index,
            });
            let now = shared.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            shared.peak.fetch_max(now, Ordering::SeqCst);

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            } else {
                tokio::task::yield_now().await;
            }

            shared.in_flight.fetch_sub(1, Ordering::SeqCst);
            shared.events.lock().unwrap().push(Event::Finished {
                wave: attempt.wave,
                vertex: attempt.vertex.clone(),
                index: attempt.index,
            });

            match step {
                Step::Pass => Ok(Outcome::Passed),
                Step::Fail => Ok(Outcome::Failed),
                Step::Error => Err(anyhow::anyhow!("scripted error for {}", attempt.vertex)),
                Step::Panic => panic!("scripted panic for {}", attempt.vertex),
            }
        })
    }
}
