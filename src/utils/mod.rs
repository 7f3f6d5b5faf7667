// Gateway module for utils - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod errors;
mod input;
mod logger;

// Public re-exports - the ONLY way to access utils functionality
pub use errors::CliError;
pub use input::{resolve_prompt, InputMode};
pub use logger::init_logger;
