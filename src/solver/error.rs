use thiserror::Error;

/// Failure to obtain a usable [`SolveResult`](super::SolveResult).
///
/// Every variant is treated the same way by the replay engine: the session
/// halts and nothing is animated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("Solver request failed: {0}")]
    Transport(String),
    #[error("Solver returned HTTP {0}")]
    Status(u16),
    #[error("Failed to parse solver response: {0}")]
    Decode(String),
    #[error("Solver request timed out after {0}ms")]
    Timeout(u64),
}
