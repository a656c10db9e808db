//! Agent configuration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted agent: one named LLM configuration.
///
/// Immutable for the duration of a run; mutated only through the explicit
/// update operations on the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Row id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning user reference (user management lives outside this service).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,

    /// Provider tag, e.g. "ollama" or "openai".
    pub provider: String,

    /// Model identifier passed to the provider.
    pub model: String,

    /// Sampling temperature; runs fall back to 0 when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Provider base endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Inactive agents are kept but not offered for execution.
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub owner_id: Option<i64>,

    /// Defaults to the local provider, matching the service's default agent.
    #[serde(default = "default_provider")]
    pub provider: String,

    pub model: String,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft: AgentDraft =
            serde_json::from_str(r#"{"name": "helper", "model": "gemma:2b"}"#).unwrap();
        assert_eq!(draft.provider, "ollama");
        assert!(draft.active);
        assert!(draft.temperature.is_none());
        assert!(draft.base_url.is_none());
    }

    #[test]
    fn test_draft_explicit_fields() {
        let draft: AgentDraft = serde_json::from_str(
            r#"{"name": "helper", "model": "gpt-4o", "provider": "openai", "temperature": 0.7, "active": false}"#,
        )
        .unwrap();
        assert_eq!(draft.provider, "openai");
        assert_eq!(draft.temperature, Some(0.7));
        assert!(!draft.active);
    }

    #[test]
    fn test_agent_serialization_skips_empty_options() {
        let agent = Agent {
            id: 1,
            name: "helper".to_string(),
            description: None,
            owner_id: None,
            provider: "ollama".to_string(),
            model: "gemma:2b".to_string(),
            temperature: None,
            base_url: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&agent).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("base_url").is_none());
        assert_eq!(json["provider"], "ollama");
    }
}
