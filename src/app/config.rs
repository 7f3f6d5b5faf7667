use directories::ProjectDirs;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::constants::{
    API_KEY_ENV_VAR, CONFIG_DIR_NAME, CONFIG_DOTFILE_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use crate::utils::CliError;

/// Main configuration structure
///
/// Constructed fresh per invocation by the layered merge in `load_config`;
/// mutated only through `set_value` and the unavailable-models operations,
/// each of which is followed by a full re-persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenRouter API key (secret; empty means not configured)
    pub api_key: String,
    /// Model used when `--model` is not passed
    pub default_model: String,
    /// Temperature used when `--temperature` is not passed (0.0-2.0)
    pub default_temperature: f64,
    /// Max tokens used when `--max-tokens` is not passed
    pub default_max_tokens: u32,
    /// Output format for chat responses: pretty, raw, or json
    pub output_format: OutputFormat,
    /// Base URL of the gateway API
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Model ids excluded from `list` output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_models: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_model: DEFAULT_MODEL.to_string(),
            default_temperature: DEFAULT_TEMPERATURE,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            output_format: OutputFormat::Pretty,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            unavailable_models: Vec::new(),
        }
    }
}

impl Config {
    /// Set a configuration field from its string representation
    ///
    /// Validates per-field type and enum constraints; unknown keys are
    /// rejected. The caller is responsible for re-persisting on success.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        match key {
            "api_key" => self.api_key = value.to_string(),
            "default_model" => self.default_model = value.to_string(),
            "default_temperature" => {
                self.default_temperature = value
                    .parse()
                    .map_err(|_| CliError::Validation("temperature must be a number".to_string()))?;
            }
            "default_max_tokens" => {
                self.default_max_tokens = value.parse().map_err(|_| {
                    CliError::Validation("max_tokens must be an integer".to_string())
                })?;
            }
            "output_format" => {
                self.output_format = value.parse()?;
            }
            "timeout" => {
                let timeout: u64 = value.parse().map_err(|_| {
                    CliError::Validation("timeout must be an integer (seconds)".to_string())
                })?;
                if timeout == 0 {
                    return Err(CliError::Validation(
                        "timeout must be greater than zero".to_string(),
                    ));
                }
                self.timeout = timeout;
            }
            _ => {
                return Err(CliError::Validation(format!("unknown config key: {key}")));
            }
        }
        Ok(())
    }

    /// Check if a model is in the unavailable list
    pub fn is_model_unavailable(&self, model_id: &str) -> bool {
        self.unavailable_models.iter().any(|m| m == model_id)
    }

    /// Add a model to the unavailable list; duplicates are rejected
    pub fn add_unavailable_model(&mut self, model_id: &str) -> Result<(), CliError> {
        if self.is_model_unavailable(model_id) {
            return Err(CliError::Validation(format!(
                "model {model_id} is already marked as unavailable"
            )));
        }
        self.unavailable_models.push(model_id.to_string());
        Ok(())
    }

    /// Remove a model from the unavailable list; absent ids are rejected
    pub fn remove_unavailable_model(&mut self, model_id: &str) -> Result<(), CliError> {
        let position = self
            .unavailable_models
            .iter()
            .position(|m| m == model_id)
            .ok_or_else(|| {
                CliError::Validation(format!("model {model_id} not found in unavailable list"))
            })?;
        self.unavailable_models.remove(position);
        Ok(())
    }
}

/// Get the path to the config file
///
/// Platform config directory first, then `~/.config`, then a dotfile in the
/// working directory as a last resort.
pub fn config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("", "", CONFIG_DIR_NAME) {
        return proj_dirs.config_dir().join(CONFIG_FILE_NAME);
    }

    if let Ok(home) = env::var("HOME").or_else(|_| env::var("USERPROFILE")) {
        return PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
    }

    PathBuf::from(CONFIG_DOTFILE_NAME)
}

/// Load configuration from defaults, the config file, and the environment
///
/// A missing file is not an error; a file that fails to parse is. An empty
/// API key is not validated here so that config-inspection commands work
/// without one.
pub fn load_config() -> Result<Config, CliError> {
    load_config_from(&config_path(), env::var(API_KEY_ENV_VAR).ok())
}

fn load_config_from(path: &Path, env_api_key: Option<String>) -> Result<Config, CliError> {
    let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()
        .map_err(|err| CliError::Config(format!("failed to parse config file: {err}")))?;

    // Environment variable takes precedence over the persisted key
    if let Some(key) = env_api_key.filter(|key| !key.is_empty()) {
        config.api_key = key;
    }

    Ok(config)
}

/// Save configuration to the config file
pub fn save_config(config: &Config) -> Result<(), CliError> {
    save_config_to(config, &config_path())
}

fn save_config_to(config: &Config, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| CliError::Config(format!("failed to create config directory: {err}")))?;
    }

    let toml_string = toml::to_string_pretty(config)
        .map_err(|err| CliError::Config(format!("failed to serialize config: {err}")))?;

    write_restricted(path, &toml_string)
        .map_err(|err| CliError::Config(format!("failed to write config file: {err}")))
}

// The config file carries the API key, so it is written owner-only.
#[cfg(unix)]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
