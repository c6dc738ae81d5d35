//! Mock solver for deterministic tests.
//!
//! Answers from a table of canned results and records every request so tests
//! can assert on what the application asked for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Algorithm, SolveResult, SolverClient, SolverError};

/// Canned behavior for [`MockSolverClient`]
#[derive(Debug, Clone, Default)]
pub struct MockSolverConfig {
    /// Per-algorithm responses
    pub responses: HashMap<Algorithm, Result<SolveResult, SolverError>>,
    /// Artificial latency before answering
    pub delay: Duration,
}

impl MockSolverConfig {
    pub fn with_result(mut self, algorithm: Algorithm, result: SolveResult) -> Self {
        self.responses.insert(algorithm, Ok(result));
        self
    }

    pub fn with_error(mut self, algorithm: Algorithm, error: SolverError) -> Self {
        self.responses.insert(algorithm, Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Solver client that never touches the network
#[derive(Debug, Clone, Default)]
pub struct MockSolverClient {
    config: MockSolverConfig,
    requests: Arc<Mutex<Vec<Algorithm>>>,
}

impl MockSolverClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: MockSolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Algorithms requested so far, oldest first
    pub fn requests(&self) -> Vec<Algorithm> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SolverClient for MockSolverClient {
    async fn solve(&self, algorithm: Algorithm) -> Result<SolveResult, SolverError> {
        self.requests.lock().push(algorithm);

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        self.config
            .responses
            .get(&algorithm)
            .cloned()
            .unwrap_or_else(|| Err(SolverError::Status(404)))
    }
}
