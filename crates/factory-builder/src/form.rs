//! Form controller: holds the draft, gates saves, and routes them to the API.

use async_trait::async_trait;
use factory_contract::Agent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::api::AgentApi;
use crate::draft::{AgentDraft, DraftChange, DraftSeed};

/// User-facing form failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Fail-fast validation; no request is sent.
    #[error("please enter an agent name")]
    MissingName,

    /// Generic save failure; the draft is left untouched so the user can
    /// retry.
    #[error("failed to save agent")]
    SaveFailed,
}

/// One agent draft being created or edited.
pub struct AgentForm {
    api: Arc<dyn AgentApi>,
    draft: AgentDraft,
    /// Set in edit context; save routes to update instead of create.
    agent_id: Option<String>,
}

impl AgentForm {
    /// Open a create form seeded with the defaults.
    pub fn new(api: Arc<dyn AgentApi>) -> Self {
        Self::with_seed(api, DraftSeed::default())
    }

    /// Open a create form with initial values merged over the defaults.
    pub fn with_seed(api: Arc<dyn AgentApi>, seed: DraftSeed) -> Self {
        Self {
            api,
            draft: AgentDraft::seeded(seed),
            agent_id: None,
        }
    }

    /// Open an edit form for an existing agent.
    pub fn edit(api: Arc<dyn AgentApi>, agent_id: impl Into<String>, seed: DraftSeed) -> Self {
        Self {
            api,
            draft: AgentDraft::seeded(seed),
            agent_id: Some(agent_id.into()),
        }
    }

    /// Current draft state.
    pub fn draft(&self) -> &AgentDraft {
        &self.draft
    }

    /// Replace one named field in the draft.
    pub fn apply(&mut self, change: DraftChange) {
        self.draft.apply(change);
    }

    /// Submit the full draft. Returns the persisted record on success; the
    /// caller reacts (navigation). On failure the draft is unchanged.
    pub async fn save(&self) -> Result<Agent, FormError> {
        if self.draft.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }

        let result = match &self.agent_id {
            Some(id) => self.api.update_agent(id, self.draft.to_patch()).await,
            None => self.api.create_agent(self.draft.to_create()).await,
        };
        result.map_err(|e| {
            warn!(error = %e, "agent save failed");
            FormError::SaveFailed
        })
    }

    /// Exercise the draft against an execution backend.
    pub async fn run_test(&self, tester: &dyn AgentTester) -> TestReport {
        tester.test(&self.draft).await
    }
}

/// Outcome of exercising a draft against an execution backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub status: TestStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// The request was accepted but nothing ran.
    Acknowledged,
    Completed,
    Failed,
}

/// Extension point for running a draft against a real execution backend.
#[async_trait]
pub trait AgentTester: Send + Sync {
    async fn test(&self, draft: &AgentDraft) -> TestReport;
}

/// Placeholder backend: acknowledges the request without running anything.
pub struct NoopTester;

#[async_trait]
impl AgentTester for NoopTester {
    async fn test(&self, _draft: &AgentDraft) -> TestReport {
        TestReport {
            status: TestStatus::Acknowledged,
            message: "test runs are not available yet".to_string(),
        }
    }
}
