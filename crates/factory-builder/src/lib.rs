//! Client-side agent builder: the form draft, its save flow, and the derived
//! preview values shown next to the editor.

pub mod api;
pub mod draft;
pub mod form;
pub mod models;

pub use api::{AgentApi, ApiClientError, HttpAgentApi};
pub use draft::{AgentDraft, DraftChange, DraftSeed};
pub use form::{AgentForm, AgentTester, FormError, NoopTester, TestReport, TestStatus};
pub use models::{model_info, ModelInfo, MODELS};
