use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    #[default]
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

/// Request payload for the chat completions endpoint
///
/// Zero temperature and zero max_tokens are omitted from the wire so the
/// gateway applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
}

/// One candidate completion returned by the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from a chat completion request
///
/// Every field is defaultable: providers occasionally return a 200 with a
/// semantically empty envelope, which must parse so it can be diagnosed
/// instead of failing as a transport error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

/// Pricing information for a model, decimal-as-string ("0" means free)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPricing {
    pub prompt: String,
    pub completion: String,
}

/// Architectural information about a model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    pub modality: String,
    pub tokenizer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruct_type: Option<String>,
}

/// An available model as reported by the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub created: i64,
    pub context_length: u32,
    pub pricing: ModelPricing,
    pub architecture: Architecture,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // string or object depending on the upstream provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_provider: Option<serde_json::Value>,
}

/// Response from the models list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsResponse {
    pub data: Vec<ModelInfo>,
}

/// A classified error response from the gateway
///
/// Distinct from transport errors: this is the gateway or an upstream
/// provider reporting a condition (rate limit, invalid model, quota) with an
/// HTTP status of 400 or above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub error_type: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_type {
            Some(error_type) => write!(f, "{}: {}", error_type, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_round_trip_preserves_fields() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-4".to_string(),
            messages: vec![Message::system("be brief"), Message::user("hello")],
            temperature: 0.7,
            max_tokens: 256,
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: ChatCompletionRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, request);
    }

    #[test]
    fn test_request_omits_zero_temperature_and_max_tokens() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-4".to_string(),
            messages: vec![Message::user("hello")],
            temperature: 0.0,
            max_tokens: 0,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![
                Message::system("s"),
                Message::user("u"),
                Message::assistant("a"),
            ],
            temperature: 1.0,
            max_tokens: 16,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        let roles: Vec<&str> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();

        assert_eq!(roles, vec!["system", "user", "assistant"]);
    }

    #[test]
    fn test_empty_envelope_parses_with_defaults() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();

        assert!(response.id.is_empty());
        assert!(response.model.is_empty());
        assert!(response.choices.is_empty());
        assert_eq!(response.usage.total_tokens, 0);
    }

    #[test]
    fn test_model_info_tolerates_sparse_entries() {
        let json = r#"{"data": [{"id": "openai/gpt-4", "name": "GPT-4"}]}"#;
        let response: ModelsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].id, "openai/gpt-4");
        assert!(response.data[0].pricing.prompt.is_empty());
        assert!(response.data[0].description.is_none());
    }

    #[test]
    fn test_api_error_display() {
        let with_type = ApiError {
            status: 429,
            message: "rate limited".to_string(),
            error_type: Some("rate_limit_error".to_string()),
        };
        assert_eq!(with_type.to_string(), "rate_limit_error: rate limited");

        let without_type = ApiError {
            status: 401,
            message: "bad key".to_string(),
            error_type: None,
        };
        assert_eq!(without_type.to_string(), "bad key");
    }
}
