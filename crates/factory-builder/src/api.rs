//! Transport seam between the form controller and the resource handlers.

use async_trait::async_trait;
use factory_contract::{Agent, AgentPatch, CreateAgent};
use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by an [`AgentApi`] implementation.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// The CRUD surface the form controller submits drafts to.
///
/// A trait rather than a concrete client so tests can substitute a fake and
/// assert that invalid drafts never reach the network.
#[async_trait]
pub trait AgentApi: Send + Sync {
    async fn create_agent(&self, req: CreateAgent) -> Result<Agent, ApiClientError>;

    async fn update_agent(&self, id: &str, patch: AgentPatch) -> Result<Agent, ApiClientError>;
}

/// HTTP client for the agent resource endpoints.
pub struct HttpAgentApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpAgentApi {
    /// Create a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn parse_agent(resp: reqwest::Response) -> Result<Agent, ApiClientError> {
        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(ApiClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<Agent>()
            .await
            .map_err(|e| ApiClientError::Transport(e.to_string()))
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn create_agent(&self, req: CreateAgent) -> Result<Agent, ApiClientError> {
        let resp = self
            .client
            .post(format!("{}/agents", self.base_url))
            .json(&req)
            .send()
            .await
            .map_err(|e| ApiClientError::Transport(e.to_string()))?;
        Self::parse_agent(resp).await
    }

    async fn update_agent(&self, id: &str, patch: AgentPatch) -> Result<Agent, ApiClientError> {
        let resp = self
            .client
            .patch(format!("{}/agents/{id}", self.base_url))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ApiClientError::Transport(e.to_string()))?;
        Self::parse_agent(resp).await
    }
}
