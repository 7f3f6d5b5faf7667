use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::{ApiError, ChatCompletionResponse, ModelInfo};
use crate::app::config_path;
use crate::constants::API_KEY_ENV_VAR;
use crate::utils::CliError;

/// The desired output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Raw,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Raw => "raw",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pretty" => Ok(Self::Pretty),
            "raw" => Ok(Self::Raw),
            "json" => Ok(Self::Json),
            _ => Err(CliError::Validation(
                "output_format must be: pretty, raw, or json".to_string(),
            )),
        }
    }
}

/// Render a chat completion response as displayable text
///
/// An empty `choices` array is diagnosed rather than printed: an envelope
/// with no id and no model is a failed/empty gateway response, anything else
/// with no choices means the model was unavailable or rate-limited.
pub fn format_chat_response(
    response: &ChatCompletionResponse,
    format: OutputFormat,
) -> Result<String, CliError> {
    if response.choices.is_empty() {
        if response.id.is_empty() && response.model.is_empty() {
            return Err(CliError::EmptyResult(
                "no response from API (this may be a rate limit or provider error)".to_string(),
            ));
        }
        return Err(CliError::EmptyResult(
            "no choices in response - model may be unavailable or rate-limited".to_string(),
        ));
    }

    // First choice only; multi-choice responses are not supported
    let message = &response.choices[0].message.content;

    match format {
        OutputFormat::Raw => Ok(message.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(response)
            .map_err(|err| CliError::Transport(format!("failed to marshal response: {err}"))),
        OutputFormat::Pretty => {
            let mut output = message.clone();
            if response.usage.total_tokens > 0 {
                let usage = format!(
                    "Tokens used: {} (prompt: {}, completion: {})",
                    response.usage.total_tokens,
                    response.usage.prompt_tokens,
                    response.usage.completion_tokens
                );
                output.push_str("\n\n");
                output.push_str(&usage.cyan().to_string());
            }
            Ok(output)
        }
    }
}

/// Filter models by a case-insensitive substring match on id and name
pub fn filter_models(models: Vec<ModelInfo>, filter: Option<&str>) -> Vec<ModelInfo> {
    let Some(filter) = filter else {
        return models;
    };
    let needle = filter.to_lowercase();
    models
        .into_iter()
        .filter(|model| {
            model.id.to_lowercase().contains(&needle)
                || model.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Render a list of models as a table, or as JSON
pub fn format_model_list(models: &[ModelInfo], format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(models)
            .map_err(|err| CliError::Transport(format!("failed to marshal models: {err}")));
    }

    let mut output = format!(
        "{:<50} | {:<15} | {:<35} | {:<15}\n",
        "Model ID", "Context", "Pricing (prompt/completion)", "Modality"
    );
    output.push_str(&"-".repeat(120));
    output.push('\n');

    for model in models {
        let pricing = format!(
            "{} / {}",
            format_price(&model.pricing.prompt),
            format_price(&model.pricing.completion)
        );
        let modality = if model.architecture.modality.is_empty() {
            "text"
        } else {
            model.architecture.modality.as_str()
        };

        output.push_str(&format!(
            "{:<50} | {:<15} | {:<35} | {:<15}\n",
            truncate(&model.id, 50),
            model.context_length,
            truncate(&pricing, 35),
            modality
        ));
    }

    Ok(output)
}

/// Format a price string for display; empty or "0" means free
fn format_price(price: &str) -> String {
    if price.is_empty() || price == "0" {
        return "free".to_string();
    }
    truncate(price, 15)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Mask an API key for display, keeping only the last 4 characters
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    if key.chars().count() <= 4 {
        return "****".to_string();
    }
    let last4: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("sk-...{last4}")
}

/// Print an error to stderr in a user-friendly way
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

/// Print a classified gateway error with its status and type
pub fn print_api_error(err: &ApiError) {
    match &err.error_type {
        Some(error_type) => eprintln!(
            "{} {} ({}, HTTP {})",
            "API Error:".red(),
            err.message,
            error_type,
            err.status
        ),
        None => eprintln!("{} {} (HTTP {})", "API Error:".red(), err.message, err.status),
    }
}

/// Print API key setup instructions to stderr
pub fn print_setup_instructions() {
    eprintln!();
    eprintln!("{}", "To set up the OpenRouter CLI:".yellow());
    eprintln!();
    eprintln!("1. Get an API key from https://openrouter.ai");
    eprintln!("2. Set it using one of:");
    eprintln!(
        "   - Environment variable: {}",
        format!("export {API_KEY_ENV_VAR}=sk-...").cyan()
    );
    eprintln!(
        "   - Config file: {}",
        config_path().display().to_string().cyan()
    );
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Architecture, Choice, Message, ModelPricing, Usage};
    use pretty_assertions::assert_eq;

    fn response_with_choice(content: &str, total_tokens: u32) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "gen-123".to_string(),
            object: "chat.completion".to_string(),
            created: 1700000000,
            model: "openai/gpt-4".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage {
                prompt_tokens: 10,
                completion_tokens: total_tokens.saturating_sub(10),
                total_tokens,
            },
        }
    }

    fn model(id: &str, name: &str) -> ModelInfo {
        ModelInfo {
            id: id.to_string(),
            name: name.to_string(),
            context_length: 8192,
            pricing: ModelPricing {
                prompt: "0.00003".to_string(),
                completion: "0.00006".to_string(),
            },
            architecture: Architecture {
                modality: "text".to_string(),
                tokenizer: "cl100k".to_string(),
                instruct_type: None,
            },
            ..ModelInfo::default()
        }
    }

    #[test]
    fn test_empty_envelope_yields_no_response_diagnostic() {
        let response = ChatCompletionResponse::default();
        let err = format_chat_response(&response, OutputFormat::Pretty).unwrap_err();

        assert!(err.to_string().contains("no response from API"));
    }

    #[test]
    fn test_no_choices_with_id_yields_generic_diagnostic() {
        let response = ChatCompletionResponse {
            id: "gen-123".to_string(),
            model: "openai/gpt-4".to_string(),
            ..ChatCompletionResponse::default()
        };
        let err = format_chat_response(&response, OutputFormat::Pretty).unwrap_err();

        assert!(err.to_string().contains("no choices in response"));
    }

    #[test]
    fn test_pretty_appends_usage_line_when_tokens_used() {
        let response = response_with_choice("hello there", 42);
        let output = format_chat_response(&response, OutputFormat::Pretty).unwrap();

        assert!(output.starts_with("hello there"));
        assert!(output.contains("Tokens used: 42"));
    }

    #[test]
    fn test_pretty_omits_usage_line_at_zero_tokens() {
        let mut response = response_with_choice("hello there", 0);
        response.usage = Usage::default();
        let output = format_chat_response(&response, OutputFormat::Pretty).unwrap();

        assert_eq!(output, "hello there");
    }

    #[test]
    fn test_raw_returns_content_only() {
        let response = response_with_choice("just the text", 42);
        let output = format_chat_response(&response, OutputFormat::Raw).unwrap();

        assert_eq!(output, "just the text");
    }

    #[test]
    fn test_json_round_trips_the_full_response() {
        let response = response_with_choice("hello", 42);
        let output = format_chat_response(&response, OutputFormat::Json).unwrap();

        let parsed: ChatCompletionResponse = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.id, "gen-123");
        assert_eq!(parsed.choices[0].message.content, "hello");
        assert_eq!(parsed.usage.total_tokens, 42);
    }

    #[test]
    fn test_filter_models_matches_id_and_name_case_insensitively() {
        let models = vec![
            model("openai/gpt-4", "GPT-4"),
            model("anthropic/claude-3-opus", "Claude 3 Opus"),
            model("meta-llama/llama-3-70b", "Llama 3 70B"),
        ];

        let filtered = filter_models(models.clone(), Some("CLAUDE"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "anthropic/claude-3-opus");

        let by_name = filter_models(models.clone(), Some("gpt"));
        assert_eq!(by_name.len(), 1);

        let all = filter_models(models, None);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_model_table_contains_header_and_rows() {
        let mut free_model = model("meta-llama/llama-3-8b:free", "Llama 3 8B (free)");
        free_model.pricing = ModelPricing {
            prompt: "0".to_string(),
            completion: "0".to_string(),
        };

        let output =
            format_model_list(&[model("openai/gpt-4", "GPT-4"), free_model], OutputFormat::Pretty)
                .unwrap();

        assert!(output.contains("Model ID"));
        assert!(output.contains("openai/gpt-4"));
        assert!(output.contains("free / free"));
        assert!(output.contains("0.00003 / 0.00006"));
    }

    #[test]
    fn test_format_price_free_cases() {
        assert_eq!(format_price(""), "free");
        assert_eq!(format_price("0"), "free");
        assert_eq!(format_price("0.001"), "0.001");
    }

    #[test]
    fn test_truncate_long_values() {
        let long = "a".repeat(60);
        let truncated = truncate(&long, 50);

        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key(""), "(not set)");
        assert_eq!(mask_api_key("abcd"), "****");
        assert_eq!(mask_api_key("sk-or-v1-abcdef1234"), "sk-...1234");
    }
}
