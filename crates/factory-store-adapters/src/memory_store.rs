use async_trait::async_trait;
use chrono::Utc;
use factory_contract::{Agent, AgentPatch, AgentReader, AgentStoreError, AgentWriter, NewAgent};

/// In-memory storage for testing and local development.
#[derive(Default)]
pub struct MemoryStore {
    entries: tokio::sync::RwLock<std::collections::HashMap<String, Agent>>,
}

impl MemoryStore {
    /// Create a new in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentReader for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Agent>, AgentStoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Agent>, AgentStoreError> {
        let entries = self.entries.read().await;
        let mut agents: Vec<Agent> = entries
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; id as a tie-break for same-instant inserts.
        agents.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(agents)
    }
}

#[async_trait]
impl AgentWriter for MemoryStore {
    async fn create(&self, agent: NewAgent) -> Result<Agent, AgentStoreError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&agent.id) {
            return Err(AgentStoreError::AlreadyExists);
        }
        let agent = agent.into_agent(Utc::now());
        entries.insert(agent.id.clone(), agent.clone());
        Ok(agent)
    }

    async fn update(&self, id: &str, patch: &AgentPatch) -> Result<Agent, AgentStoreError> {
        let mut entries = self.entries.write().await;
        let agent = entries
            .get_mut(id)
            .ok_or_else(|| AgentStoreError::NotFound(id.to_string()))?;
        patch.apply_to(agent);
        Ok(agent.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AgentStoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(id);
        Ok(())
    }
}
