use thiserror::Error;

use crate::api::ApiError;

/// Main error type for the CLI
///
/// Every failure a command can surface falls into one of these categories,
/// and the exit-code / rendering policy in `main` is keyed off the variant.
#[derive(Error, Debug)]
pub enum CliError {
    /// No API key resolved from config, environment, or flags
    #[error("No API key found")]
    MissingApiKey,

    /// No prompt argument and no piped stdin
    #[error("no input provided: use argument or pipe")]
    NoInput,

    /// Loading or persisting the config file failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad CLI input: unknown config key, non-numeric value, duplicate or
    /// absent denylist entry. Never sent over the network.
    #[error("{0}")]
    Validation(String),

    /// Request construction, network failure, timeout, or a success-status
    /// body that does not match the expected envelope
    #[error("{0}")]
    Transport(String),

    /// Classified >=400 response from the gateway
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Structurally valid but content-empty response
    #[error("{0}")]
    EmptyResult(String),
}
