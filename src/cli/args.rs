use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "openrouter")]
#[command(version)]
#[command(about = "Access AI models from your terminal via the OpenRouter gateway")]
#[command(long_about = "A command-line interface for the OpenRouter gateway.

It allows you to:
- Send chat completions to hundreds of AI models
- List available models with pricing and capabilities
- Pipe text input and output for integration with other tools

Get started:
  openrouter chat \"Hello, world!\"
  openrouter list
  echo \"Tell me a joke\" | openrouter chat")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// OpenRouter API key (overrides config and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a chat completion request
    Chat(ChatArgs),
    /// List available models with pricing and capabilities
    List(ListArgs),
    /// Manage configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
#[command(after_help = "Input options:
  openrouter chat \"What is Rust?\"                      # Argument only
  echo \"Explain lifetimes\" | openrouter chat           # Pipe only
  cat file.txt | openrouter chat --stdin \"Summarize:\"  # Combine both")]
pub struct ChatArgs {
    /// Prompt text (read from stdin when piped)
    pub prompt: Option<String>,

    /// Model to use (e.g., openai/gpt-4)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature for response generation (0.0-2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Maximum tokens in response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Combine the prompt argument with piped input
    #[arg(long)]
    pub stdin: bool,

    /// Output only the response text (for piping)
    #[arg(long)]
    pub raw: bool,

    /// Output the full API response as JSON
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter models by name or ID
    #[arg(long)]
    pub filter: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., default_model)
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., default_model)
        key: String,
        /// New value
        value: String,
    },
    /// Show all configuration settings
    Show,
    /// Mark a model as unavailable (hidden from `list`)
    AddUnavailable {
        /// Model id (e.g., qwen/model:free)
        model_id: String,
    },
    /// Remove a model from the unavailable list
    RemoveUnavailable {
        /// Model id (e.g., qwen/model:free)
        model_id: String,
    },
    /// List all models marked as unavailable
    ListUnavailable,
}
