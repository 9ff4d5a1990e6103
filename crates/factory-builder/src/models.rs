//! Selectable model catalog shown by the form's model picker.
//!
//! Informational only: picking a model does not clamp the draft's
//! `max_tokens` to the model's context window.

/// One selectable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
    pub cost: &'static str,
    pub max_tokens: u32,
}

/// The catalog, in display order.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "claude-sonnet-4.5",
        name: "Claude Sonnet 4.5",
        provider: "Anthropic",
        description: "Balanced performance and speed",
        cost: "$3 / 1M tokens",
        max_tokens: 200_000,
    },
    ModelInfo {
        id: "claude-opus-4.6",
        name: "Claude Opus 4.6",
        provider: "Anthropic",
        description: "Most capable, best for complex tasks",
        cost: "$15 / 1M tokens",
        max_tokens: 200_000,
    },
    ModelInfo {
        id: "claude-haiku-4.5",
        name: "Claude Haiku 4.5",
        provider: "Anthropic",
        description: "Fast and affordable",
        cost: "$0.25 / 1M tokens",
        max_tokens: 200_000,
    },
    ModelInfo {
        id: "gpt-4o",
        name: "GPT-4o",
        provider: "OpenAI",
        description: "OpenAI flagship model",
        cost: "$2.5 / 1M tokens",
        max_tokens: 128_000,
    },
    ModelInfo {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        provider: "OpenAI",
        description: "Small, fast, affordable",
        cost: "$0.15 / 1M tokens",
        max_tokens: 128_000,
    },
];

/// Look up a catalog entry by model id.
pub fn model_info(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}
