use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{REFERER_HEADER, REFERER_VALUE, TITLE_HEADER, TITLE_VALUE};
use crate::utils::CliError;

use super::types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ModelInfo, ModelsResponse,
};

/// Client for the OpenRouter gateway API
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a new gateway client with the configured request timeout
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|err| CliError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout_secs,
        })
    }

    /// Send a chat completion request to the gateway
    pub async fn send_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CliError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            url = %url,
            model = %request.model,
            message_count = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(REFERER_HEADER, REFERER_VALUE)
            .header(TITLE_HEADER, TITLE_VALUE)
            .json(request)
            .send()
            .await
            .map_err(|err| self.request_error(err, &url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CliError::Transport(format!("failed to read response: {err}")))?;

        if status.as_u16() >= 400 {
            warn!(url = %url, status = %status, "gateway returned error status");
            return Err(parse_api_error(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body)
            .map_err(|err| CliError::Transport(format!("failed to parse response: {err}")))
    }

    /// Fetch the list of available models
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, CliError> {
        let url = format!("{}/models", self.base_url);
        debug!(url = %url, "fetching model list");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(REFERER_HEADER, REFERER_VALUE)
            .header(TITLE_HEADER, TITLE_VALUE)
            .send()
            .await
            .map_err(|err| self.request_error(err, &url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CliError::Transport(format!("failed to read response: {err}")))?;

        if status.as_u16() >= 400 {
            warn!(url = %url, status = %status, "gateway returned error status");
            return Err(parse_api_error(status.as_u16(), &body).into());
        }

        let models: ModelsResponse = serde_json::from_str(&body)
            .map_err(|err| CliError::Transport(format!("failed to parse response: {err}")))?;
        Ok(models.data)
    }

    fn request_error(&self, err: reqwest::Error, url: &str) -> CliError {
        if err.is_timeout() {
            return CliError::Transport(format!(
                "request timed out after {}s while calling '{}'",
                self.timeout_secs, url
            ));
        }
        if err.is_connect() {
            return CliError::Transport(format!("failed to connect to '{}': {}", url, err));
        }
        CliError::Transport(format!("failed to send request to '{}': {}", url, err))
    }
}

/// Error envelope shape used by the gateway for >=400 responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

/// Upstream providers are inconsistent: the `error` field may be an object
/// with message/type or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Detailed {
        #[serde(default)]
        message: String,
        #[serde(rename = "type")]
        error_type: Option<String>,
    },
    Plain(String),
}

/// Classify an error response body into an `ApiError`
///
/// Layered fallback: a body that is not JSON yields a synthesized message
/// from the raw status and body; a JSON body without a usable `error` field
/// yields "Unknown error". Classification must never fail, whatever shape
/// the provider returns.
pub fn parse_api_error(status: u16, body: &str) -> ApiError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError {
            status,
            message: format!("HTTP {}: {}", status, body),
            error_type: None,
        };
    };

    match serde_json::from_value::<ErrorEnvelope>(value) {
        Ok(envelope) => match envelope.error {
            ErrorPayload::Detailed {
                message,
                error_type: Some(error_type),
            } => ApiError {
                status,
                message,
                error_type: Some(error_type),
            },
            ErrorPayload::Detailed {
                message,
                error_type: None,
            }
            | ErrorPayload::Plain(message) => ApiError {
                status,
                message: if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                },
                error_type: None,
            },
        },
        Err(_) => ApiError {
            status,
            message: "Unknown error".to_string(),
            error_type: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_detailed_error() {
        let body = r#"{"error":{"message":"rate limited","type":"rate_limit_error"}}"#;
        let err = parse_api_error(429, body);

        assert_eq!(err.status, 429);
        assert_eq!(err.message, "rate limited");
        assert_eq!(err.error_type.as_deref(), Some("rate_limit_error"));
    }

    #[test]
    fn test_parse_detailed_error_without_type() {
        let body = r#"{"error":{"message":"invalid model"}}"#;
        let err = parse_api_error(400, body);

        assert_eq!(err.message, "invalid model");
        assert_eq!(err.error_type, None);
    }

    #[test]
    fn test_parse_bare_string_error() {
        let body = r#"{"error":"bad key"}"#;
        let err = parse_api_error(401, body);

        assert_eq!(err.message, "bad key");
        assert_eq!(err.error_type, None);
    }

    #[test]
    fn test_parse_unparsable_body() {
        let body = "<html>502 Bad Gateway</html>";
        let err = parse_api_error(502, body);

        assert_eq!(err.status, 502);
        assert!(err.message.contains("HTTP 502"));
        assert!(err.message.contains("502 Bad Gateway"));
        assert_eq!(err.error_type, None);
    }

    #[test]
    fn test_parse_body_without_error_field() {
        let err = parse_api_error(500, r#"{"detail":"boom"}"#);

        assert_eq!(err.message, "Unknown error");
        assert_eq!(err.error_type, None);
    }

    #[test]
    fn test_parse_empty_error_object() {
        let err = parse_api_error(500, r#"{"error":{}}"#);

        assert_eq!(err.message, "Unknown error");
        assert_eq!(err.error_type, None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://openrouter.ai/api/v1/", "sk-test", 60).unwrap();
        assert_eq!(client.base_url, "https://openrouter.ai/api/v1");
    }
}
