use serde::Deserialize;

/// Which execution unit the driver hands each vertex attempt to.
///
/// - `Command`: run the vertex's `cmd` through the platform shell; the exit
///   status decides pass/fail (default).
/// - `CoinFlip`: no real work; each attempt passes or fails at random. Useful
///   for exercising fail-fast and absorption behaviour of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorKind {
    #[default]
    Command,
    CoinFlip,
}
