//! Solver collaborator: the remote service that runs BFS/DFS/A* and returns
//! the expansion order plus the final path.

pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use error::SolverError;
pub use http::HttpSolverClient;
pub use mock::{MockSolverClient, MockSolverConfig};
pub use types::{Algorithm, SolveResult};

use async_trait::async_trait;

/// Something that can produce a [`SolveResult`] for an algorithm
#[async_trait]
pub trait SolverClient: Send + Sync {
    /// Fetch the solver output for `algorithm`
    async fn solve(&self, algorithm: Algorithm) -> Result<SolveResult, SolverError>;
}
