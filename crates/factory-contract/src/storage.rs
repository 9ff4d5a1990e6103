//! Store contract the resource handlers depend on.
//!
//! Implementations run with elevated privilege that bypasses any row-level
//! access policy the backing store might enforce. Only the resource handlers
//! may hold a store, and they own all authorization logic the store skips.

use async_trait::async_trait;
use thiserror::Error;

use crate::agent::{Agent, AgentPatch, NewAgent};

/// Storage errors.
#[derive(Debug, Error)]
pub enum AgentStoreError {
    /// No row matches the given id.
    #[error("agent not found: {0}")]
    NotFound(String),

    /// An agent with the given id already exists (create only).
    #[error("agent already exists")]
    AlreadyExists,

    /// IO or connection error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read operations.
#[async_trait]
pub trait AgentReader: Send + Sync {
    /// Load a single agent by id.
    async fn get(&self, id: &str) -> Result<Option<Agent>, AgentStoreError>;

    /// List an owner's agents, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Agent>, AgentStoreError>;
}

/// Write operations.
#[async_trait]
pub trait AgentWriter: AgentReader {
    /// Insert a new agent. The store assigns `created_at` and returns the
    /// full row. Returns `AlreadyExists` if the id is taken.
    async fn create(&self, agent: NewAgent) -> Result<Agent, AgentStoreError>;

    /// Apply a partial overwrite to the row matching `id` and return the
    /// updated row. Returns `NotFound` when no row matches.
    async fn update(&self, id: &str, patch: &AgentPatch) -> Result<Agent, AgentStoreError>;

    /// Delete the row matching `id`. Deleting a missing row is not an error.
    async fn delete(&self, id: &str) -> Result<(), AgentStoreError>;
}

/// Full store capability (read + write).
pub trait AgentStore: AgentWriter {}

impl<T: AgentWriter + ?Sized> AgentStore for T {}
