//! Wire types for the workflow dashboard backend.
//!
//! Responses are decoded into these records before anything reaches the
//! view model. A body that doesn't fit is a parse failure, never a partial
//! record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

const NO_DESCRIPTION: &str = "No description provided.";

// ── Workflows ──

/// A server-defined task the user can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Workflow {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Listing entries may omit `name` and `description`; the backend's own
/// listing falls back to the id and a stock description.
#[derive(Deserialize)]
struct RawWorkflow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawWorkflow::deserialize(deserializer)?;
        Ok(Workflow {
            name: raw.name.unwrap_or_else(|| raw.id.clone()),
            description: raw.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            id: raw.id,
        })
    }
}

// ── Status ──

/// Application-level outcome reported in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response from `POST /api/run_workflow/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: String,
}

impl RunResult {
    pub fn success(message: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.to_string(),
        }
    }
}

// ── Generation ──

/// The fixed set of generation backends the server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    OpenAi,
    DeepSeek,
}

impl Model {
    /// Selector order.
    pub const ALL: [Model; 2] = [Model::OpenAi, Model::DeepSeek];

    /// Value sent on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Model::OpenAi => "openai",
            Model::DeepSeek => "deepseek",
        }
    }

    /// Human-readable selector label.
    pub fn label(self) -> &'static str {
        match self {
            Model::OpenAi => "OpenAI (gpt-4o)",
            Model::DeepSeek => "DeepSeek (deepseek-chat)",
        }
    }

    /// Next model in selector order, wrapping around.
    pub fn next(self) -> Model {
        match self {
            Model::OpenAi => Model::DeepSeek,
            Model::DeepSeek => Model::OpenAi,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown model '{s}' (expected openai or deepseek)"))
    }
}

/// Body of `POST /api/generate_ai_content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: Model,
    pub temperature: f64,
}

/// Raw generation response as the server sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub generated_text: Option<String>,
}

/// A validated generation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { generated_text: String },
    Error { message: String },
}

impl GenerationResult {
    /// Validate a raw response. A success without text is malformed.
    pub fn from_response(resp: GenerationResponse) -> Result<Self, String> {
        match resp.status {
            ResponseStatus::Success => resp
                .generated_text
                .map(|generated_text| GenerationResult::Success { generated_text })
                .ok_or_else(|| "success response without generated_text".to_string()),
            ResponseStatus::Error => Ok(GenerationResult::Error {
                message: resp.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_list_preserves_order() {
        let json = r#"[
            {"id": "b", "name": "Second", "description": "two"},
            {"id": "a", "name": "First", "description": "one"}
        ]"#;
        let list: Vec<Workflow> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "b");
        assert_eq!(list[1].id, "a");
    }

    #[test]
    fn workflow_missing_fields_fall_back() {
        let w: Workflow = serde_json::from_str(r#"{"id": "nightly"}"#).unwrap();
        assert_eq!(w.name, "nightly");
        assert_eq!(w.description, "No description provided.");
    }

    #[test]
    fn workflow_without_id_rejected() {
        let result: Result<Workflow, _> = serde_json::from_str(r#"{"name": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn run_result_deserializes() {
        let r: RunResult =
            serde_json::from_str(r#"{"status": "success", "message": "started"}"#).unwrap();
        assert_eq!(r, RunResult::success("started"));

        let r: RunResult = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert_eq!(r.status, ResponseStatus::Error);
        assert!(r.message.is_empty());
    }

    #[test]
    fn unknown_status_rejected() {
        let result: Result<RunResult, _> =
            serde_json::from_str(r#"{"status": "pending", "message": "?"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn generation_request_serializes() {
        let req = GenerationRequest {
            prompt: "haiku".into(),
            model: Model::DeepSeek,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["prompt"], "haiku");
        assert_eq!(json["model"], "deepseek");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn generation_success_requires_text() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{"status": "success", "generated_text": "X"}"#).unwrap();
        assert_eq!(
            GenerationResult::from_response(resp).unwrap(),
            GenerationResult::Success {
                generated_text: "X".into()
            }
        );

        let resp: GenerationResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(GenerationResult::from_response(resp).is_err());
    }

    #[test]
    fn generation_error_keeps_message() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{"status": "error", "message": "No prompt provided."}"#)
                .unwrap();
        assert_eq!(
            GenerationResult::from_response(resp).unwrap(),
            GenerationResult::Error {
                message: "No prompt provided.".into()
            }
        );
    }

    #[test]
    fn model_parse_and_cycle() {
        assert_eq!("openai".parse::<Model>().unwrap(), Model::OpenAi);
        assert_eq!("DeepSeek".parse::<Model>().unwrap(), Model::DeepSeek);
        assert!("gemini".parse::<Model>().is_err());
        assert_eq!(Model::OpenAi.next(), Model::DeepSeek);
        assert_eq!(Model::DeepSeek.next(), Model::OpenAi);
    }
}
