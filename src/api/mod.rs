// Gateway module for api - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod types;

// Public re-exports - the ONLY way to access api functionality
pub use client::{parse_api_error, ApiClient};
pub use types::{
    ApiError, Architecture, ChatCompletionRequest, ChatCompletionResponse, Choice, Message,
    ModelInfo, ModelPricing, ModelsResponse, Role, Usage,
};
