use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Algorithm, SolveResult, SolverClient, SolverError};

/// Default ceiling on a single solve request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Solver client for the `GET {base_url}/solve/{algorithm}` service
#[derive(Debug, Clone)]
pub struct HttpSolverClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpSolverClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SolverError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SolverError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an algorithm's solve route
    pub fn solve_url(&self, algorithm: Algorithm) -> String {
        format!("{}/solve/{}", self.base_url, algorithm.as_str())
    }

    fn transport_error(&self, err: reqwest::Error) -> SolverError {
        if err.is_timeout() {
            SolverError::Timeout(self.timeout.as_millis() as u64)
        } else {
            SolverError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl SolverClient for HttpSolverClient {
    async fn solve(&self, algorithm: Algorithm) -> Result<SolveResult, SolverError> {
        let url = self.solve_url(algorithm);
        tracing::debug!(%url, "Requesting solve");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolverError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        serde_json::from_str(&text).map_err(|err| SolverError::Decode(err.to_string()))
    }
}
