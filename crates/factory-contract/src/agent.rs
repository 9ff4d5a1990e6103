//! Agent record model: the persisted shape, the create/patch shapes, and the
//! defaults applied when a create request omits optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Model id assigned when a create request names none.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4.5";
/// Sampling temperature applied when absent.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Response token budget applied when absent.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Display glyph applied when absent.
pub const DEFAULT_ICON: &str = "🤖";
/// Accent color (hex) applied when absent.
pub const DEFAULT_COLOR: &str = "#3b82f6";
/// Record version stamped at create time. Not client-settable on create.
pub const AGENT_VERSION: &str = "1.0.0";
/// Owner id stand-in while no auth layer is wired in.
pub const PLACEHOLDER_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Inclusive sampling temperature bounds.
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 1.0);
/// Inclusive response token budget bounds.
pub const MAX_TOKENS_RANGE: (u32, u32) = (100, 200_000);

/// A configured LLM-calling profile, persisted as one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier, assigned exactly once at create.
    pub id: String,
    /// Owner identifier. Immutable after create.
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub system_prompt: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub icon: String,
    pub color: String,
    pub capabilities: Vec<String>,
    pub tools: Vec<String>,
    pub knowledge_base: Vec<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_category: Option<String>,
    pub version: String,
    /// Open key-value map, pass-through only.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Assigned by the store on insert. Immutable.
    pub created_at: DateTime<Utc>,
}

/// A fully defaulted record ready for insertion. Carries no `created_at` —
/// the store assigns that on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAgent {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub system_prompt: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub icon: String,
    pub color: String,
    pub capabilities: Vec<String>,
    pub tools: Vec<String>,
    pub knowledge_base: Vec<String>,
    pub is_public: bool,
    pub marketplace_category: Option<String>,
    pub version: String,
    pub metadata: Map<String, Value>,
}

impl NewAgent {
    /// Attach the store-assigned creation timestamp.
    pub fn into_agent(self, created_at: DateTime<Utc>) -> Agent {
        Agent {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            system_prompt: self.system_prompt,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            icon: self.icon,
            color: self.color,
            capabilities: self.capabilities,
            tools: self.tools,
            knowledge_base: self.knowledge_base,
            is_public: self.is_public,
            marketplace_category: self.marketplace_category,
            version: self.version,
            metadata: self.metadata,
            created_at,
        }
    }
}

/// Create request body. Every field except `name` and `system_prompt` is
/// optional and falls back to the documented default. Empty strings count as
/// absent for the defaulted display fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgent {
    /// Caller-asserted owner. Falls back to [`PLACEHOLDER_USER_ID`] until an
    /// auth layer provides a verified identity.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub capabilities: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub knowledge_base: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub marketplace_category: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl CreateAgent {
    /// Validate required fields and ranges, then build the full
    /// default-applied record under the given generated id.
    pub fn into_new_agent(self, id: impl Into<String>) -> Result<NewAgent, ValidationError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingRequired)?
            .to_string();
        let system_prompt = self
            .system_prompt
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::MissingRequired)?;

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        validate_temperature(temperature)?;
        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        validate_max_tokens(max_tokens)?;

        Ok(NewAgent {
            id: id.into(),
            user_id: self
                .user_id
                .unwrap_or_else(|| PLACEHOLDER_USER_ID.to_string()),
            name,
            description: self.description.filter(|d| !d.is_empty()),
            system_prompt,
            model: non_empty_or(self.model, DEFAULT_MODEL),
            temperature,
            max_tokens,
            icon: non_empty_or(self.icon, DEFAULT_ICON),
            color: non_empty_or(self.color, DEFAULT_COLOR),
            capabilities: self.capabilities.unwrap_or_default(),
            tools: self.tools.unwrap_or_default(),
            knowledge_base: self.knowledge_base.unwrap_or_default(),
            is_public: self.is_public.unwrap_or(false),
            marketplace_category: self.marketplace_category.filter(|c| !c.is_empty()),
            version: AGENT_VERSION.to_string(),
            metadata: self.metadata.unwrap_or_default(),
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Partial update body. Deliberately has no `id`, `user_id`, or `created_at`
/// fields — those are immutable, and unknown keys in the request body are
/// ignored during deserialization rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub capabilities: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub knowledge_base: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub marketplace_category: Option<String>,
    pub version: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl AgentPatch {
    /// Check range invariants on whichever numeric fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(t) = self.temperature {
            validate_temperature(t)?;
        }
        if let Some(n) = self.max_tokens {
            validate_max_tokens(n)?;
        }
        Ok(())
    }

    /// Overwrite every submitted field on `agent`, leaving the rest as-is.
    pub fn apply_to(&self, agent: &mut Agent) {
        if let Some(v) = &self.name {
            agent.name = v.clone();
        }
        if let Some(v) = &self.description {
            agent.description = Some(v.clone());
        }
        if let Some(v) = &self.system_prompt {
            agent.system_prompt = v.clone();
        }
        if let Some(v) = &self.model {
            agent.model = v.clone();
        }
        if let Some(v) = self.temperature {
            agent.temperature = v;
        }
        if let Some(v) = self.max_tokens {
            agent.max_tokens = v;
        }
        if let Some(v) = &self.icon {
            agent.icon = v.clone();
        }
        if let Some(v) = &self.color {
            agent.color = v.clone();
        }
        if let Some(v) = &self.capabilities {
            agent.capabilities = v.clone();
        }
        if let Some(v) = &self.tools {
            agent.tools = v.clone();
        }
        if let Some(v) = &self.knowledge_base {
            agent.knowledge_base = v.clone();
        }
        if let Some(v) = self.is_public {
            agent.is_public = v;
        }
        if let Some(v) = &self.marketplace_category {
            agent.marketplace_category = Some(v.clone());
        }
        if let Some(v) = &self.version {
            agent.version = v.clone();
        }
        if let Some(v) = &self.metadata {
            agent.metadata = v.clone();
        }
    }
}

/// Reasons a caller-supplied payload is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name and system prompt are required")]
    MissingRequired,

    #[error("temperature must be between {} and {}", TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)]
    TemperatureOutOfRange,

    #[error("max_tokens must be between {} and {}", MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1)]
    MaxTokensOutOfRange,
}

/// Check a sampling temperature against [`TEMPERATURE_RANGE`].
pub fn validate_temperature(t: f64) -> Result<(), ValidationError> {
    if !t.is_finite() || t < TEMPERATURE_RANGE.0 || t > TEMPERATURE_RANGE.1 {
        return Err(ValidationError::TemperatureOutOfRange);
    }
    Ok(())
}

/// Check a token budget against [`MAX_TOKENS_RANGE`].
pub fn validate_max_tokens(n: u32) -> Result<(), ValidationError> {
    if n < MAX_TOKENS_RANGE.0 || n > MAX_TOKENS_RANGE.1 {
        return Err(ValidationError::MaxTokensOutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn minimal_create() -> CreateAgent {
        CreateAgent {
            name: Some("Bot".to_string()),
            system_prompt: Some("Help users.".to_string()),
            ..CreateAgent::default()
        }
    }

    #[test]
    fn create_applies_documented_defaults() {
        let new = minimal_create().into_new_agent("ag-1").unwrap();
        assert_eq!(new.id, "ag-1");
        assert_eq!(new.user_id, PLACEHOLDER_USER_ID);
        assert_eq!(new.model, DEFAULT_MODEL);
        assert_eq!(new.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(new.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(new.icon, DEFAULT_ICON);
        assert_eq!(new.color, DEFAULT_COLOR);
        assert_eq!(new.version, AGENT_VERSION);
        assert!(new.capabilities.is_empty());
        assert!(new.tools.is_empty());
        assert!(new.knowledge_base.is_empty());
        assert!(!new.is_public);
        assert!(new.description.is_none());
        assert!(new.marketplace_category.is_none());
        assert!(new.metadata.is_empty());
    }

    #[test]
    fn create_rejects_missing_or_empty_required_fields() {
        let mut req = minimal_create();
        req.name = None;
        assert_eq!(
            req.into_new_agent("x").unwrap_err(),
            ValidationError::MissingRequired
        );

        let mut req = minimal_create();
        req.name = Some("   ".to_string());
        assert_eq!(
            req.into_new_agent("x").unwrap_err(),
            ValidationError::MissingRequired
        );

        let mut req = minimal_create();
        req.system_prompt = Some(String::new());
        assert_eq!(
            req.into_new_agent("x").unwrap_err(),
            ValidationError::MissingRequired
        );
    }

    #[test]
    fn create_rejects_out_of_range_values() {
        let mut req = minimal_create();
        req.temperature = Some(1.5);
        assert_eq!(
            req.into_new_agent("x").unwrap_err(),
            ValidationError::TemperatureOutOfRange
        );

        let mut req = minimal_create();
        req.max_tokens = Some(50);
        assert_eq!(
            req.into_new_agent("x").unwrap_err(),
            ValidationError::MaxTokensOutOfRange
        );
    }

    #[test]
    fn create_treats_empty_display_fields_as_absent() {
        let mut req = minimal_create();
        req.model = Some(String::new());
        req.icon = Some(String::new());
        req.color = Some(String::new());
        req.description = Some(String::new());
        req.marketplace_category = Some(String::new());

        let new = req.into_new_agent("x").unwrap();
        assert_eq!(new.model, DEFAULT_MODEL);
        assert_eq!(new.icon, DEFAULT_ICON);
        assert_eq!(new.color, DEFAULT_COLOR);
        assert!(new.description.is_none());
        assert!(new.marketplace_category.is_none());
    }

    #[test]
    fn create_keeps_explicit_zero_temperature() {
        let mut req = minimal_create();
        req.temperature = Some(0.0);
        let new = req.into_new_agent("x").unwrap();
        assert_eq!(new.temperature, 0.0);
    }

    #[test]
    fn patch_deserialization_drops_immutable_fields() {
        let patch: AgentPatch = serde_json::from_value(json!({
            "id": "evil",
            "user_id": "evil",
            "created_at": "2020-01-01T00:00:00Z",
            "temperature": 0.9
        }))
        .unwrap();
        assert_eq!(patch.temperature, Some(0.9));

        let mut agent = minimal_create()
            .into_new_agent("ag-1")
            .unwrap()
            .into_agent(Utc::now());
        let before = agent.clone();
        patch.apply_to(&mut agent);

        assert_eq!(agent.id, before.id);
        assert_eq!(agent.user_id, before.user_id);
        assert_eq!(agent.created_at, before.created_at);
        assert_eq!(agent.temperature, 0.9);
        assert_eq!(agent.name, before.name);
    }

    #[test]
    fn patch_validate_checks_present_fields_only() {
        assert!(AgentPatch::default().validate().is_ok());

        let patch = AgentPatch {
            temperature: Some(-0.1),
            ..AgentPatch::default()
        };
        assert_eq!(
            patch.validate().unwrap_err(),
            ValidationError::TemperatureOutOfRange
        );

        let patch = AgentPatch {
            max_tokens: Some(300_000),
            ..AgentPatch::default()
        };
        assert_eq!(
            patch.validate().unwrap_err(),
            ValidationError::MaxTokensOutOfRange
        );
    }
}
