//! The in-progress, not-yet-persisted representation of an agent being
//! created or edited.

use factory_contract::{
    AgentPatch, CreateAgent, DEFAULT_COLOR, DEFAULT_ICON, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use serde::{Deserialize, Serialize};

/// Client-editable subset of the agent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub icon: String,
    pub color: String,
    pub capabilities: Vec<String>,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            system_prompt: "You are a helpful AI assistant.".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            capabilities: Vec::new(),
        }
    }
}

/// Partial overlay merged over the defaults when a form opens with existing
/// values (edit context). Explicit values win, field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftSeed {
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub capabilities: Option<Vec<String>>,
}

/// A single-field replacement, applied with [`AgentDraft::apply`].
///
/// No cross-field validation happens here: changing the model does not clamp
/// `max_tokens` to that model's limit even though the catalog knows it.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftChange {
    Name(String),
    Description(String),
    SystemPrompt(String),
    Model(String),
    Temperature(f64),
    MaxTokens(u32),
    Icon(String),
    Color(String),
    Capabilities(Vec<String>),
}

impl AgentDraft {
    /// Defaults merged with the given seed; seeded fields win.
    pub fn seeded(seed: DraftSeed) -> Self {
        let base = Self::default();
        Self {
            name: seed.name.unwrap_or(base.name),
            description: seed.description.unwrap_or(base.description),
            system_prompt: seed.system_prompt.unwrap_or(base.system_prompt),
            model: seed.model.unwrap_or(base.model),
            temperature: seed.temperature.unwrap_or(base.temperature),
            max_tokens: seed.max_tokens.unwrap_or(base.max_tokens),
            icon: seed.icon.unwrap_or(base.icon),
            color: seed.color.unwrap_or(base.color),
            capabilities: seed.capabilities.unwrap_or(base.capabilities),
        }
    }

    /// Replace exactly the named field.
    pub fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Name(v) => self.name = v,
            DraftChange::Description(v) => self.description = v,
            DraftChange::SystemPrompt(v) => self.system_prompt = v,
            DraftChange::Model(v) => self.model = v,
            DraftChange::Temperature(v) => self.temperature = v,
            DraftChange::MaxTokens(v) => self.max_tokens = v,
            DraftChange::Icon(v) => self.icon = v,
            DraftChange::Color(v) => self.color = v,
            DraftChange::Capabilities(v) => self.capabilities = v,
        }
    }

    /// Number of characters in the system prompt.
    pub fn prompt_chars(&self) -> usize {
        self.system_prompt.chars().count()
    }

    /// Rough token estimate shown in the preview: one token per four
    /// characters, rounded up.
    pub fn estimated_tokens(&self) -> usize {
        self.prompt_chars().div_ceil(4)
    }

    /// Full draft as a create request body.
    pub fn to_create(&self) -> CreateAgent {
        CreateAgent {
            user_id: None,
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            system_prompt: Some(self.system_prompt.clone()),
            model: Some(self.model.clone()),
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            icon: Some(self.icon.clone()),
            color: Some(self.color.clone()),
            capabilities: Some(self.capabilities.clone()),
            ..CreateAgent::default()
        }
    }

    /// Full draft as a partial update body.
    pub fn to_patch(&self) -> AgentPatch {
        AgentPatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            system_prompt: Some(self.system_prompt.clone()),
            model: Some(self.model.clone()),
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            icon: Some(self.icon.clone()),
            color: Some(self.color.clone()),
            capabilities: Some(self.capabilities.clone()),
            ..AgentPatch::default()
        }
    }
}
