//! Agent record domain model and store contract.

pub mod agent;
pub mod storage;

pub use agent::{
    validate_max_tokens, validate_temperature, Agent, AgentPatch, CreateAgent, NewAgent,
    ValidationError, AGENT_VERSION, DEFAULT_COLOR, DEFAULT_ICON, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, MAX_TOKENS_RANGE, PLACEHOLDER_USER_ID, TEMPERATURE_RANGE,
};
pub use storage::{AgentReader, AgentStore, AgentStoreError, AgentWriter};
