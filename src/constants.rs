/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";

// Client identification headers sent with every request
pub const REFERER_HEADER: &str = "HTTP-Referer";
pub const REFERER_VALUE: &str = "https://github.com/openrouter-community/openrouter-cli";
pub const TITLE_HEADER: &str = "X-Title";
pub const TITLE_VALUE: &str = "OpenRouter CLI";

// Environment
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

// Timeouts
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// Default Model Configuration
pub const DEFAULT_MODEL: &str = "openai/gpt-4";
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// Config file locations
pub const CONFIG_DIR_NAME: &str = "openrouter";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_DOTFILE_NAME: &str = ".openrouter.toml";
