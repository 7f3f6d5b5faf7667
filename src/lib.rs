pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod utils;

pub use api::{ApiClient, ApiError, ChatCompletionRequest, ChatCompletionResponse, ModelInfo};
pub use app::{load_config, Config};
pub use cli::OutputFormat;
pub use utils::CliError;
