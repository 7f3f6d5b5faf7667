use tracing::debug;

use crate::api::{ApiClient, ChatCompletionRequest, Message};
use crate::app::{self, Config};
use crate::utils::{resolve_prompt, CliError, InputMode};

use super::args::{ChatArgs, Cli, Commands, ConfigCommands, ListArgs};
use super::format::{self, OutputFormat};

/// Handle the parsed command line
pub async fn handle_command(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Chat(args) => run_chat(args, cli.api_key).await,
        Commands::List(args) => run_list(args, cli.api_key).await,
        Commands::Config(action) => run_config(action),
    }
}

/// Load configuration and apply the command-line key override on top
fn load_config_with_override(api_key_override: Option<String>) -> Result<Config, CliError> {
    let mut config = app::load_config()?;
    if let Some(key) = api_key_override.filter(|key| !key.is_empty()) {
        config.api_key = key;
    }
    Ok(config)
}

async fn run_chat(args: ChatArgs, api_key_override: Option<String>) -> Result<(), CliError> {
    let config = load_config_with_override(api_key_override)?;
    if config.api_key.is_empty() {
        return Err(CliError::MissingApiKey);
    }

    let mode = if args.stdin {
        InputMode::Combine
    } else {
        InputMode::Simple
    };
    let positional: Vec<String> = args.prompt.into_iter().collect();
    let prompt = resolve_prompt(&positional, mode)?;

    let request = ChatCompletionRequest {
        model: args.model.unwrap_or_else(|| config.default_model.clone()),
        messages: vec![Message::user(prompt)],
        temperature: args.temperature.unwrap_or(config.default_temperature),
        max_tokens: args.max_tokens.unwrap_or(config.default_max_tokens),
    };

    debug!(base_url = %config.api_base_url, model = %request.model, "dispatching chat request");
    let client = ApiClient::new(&config.api_base_url, &config.api_key, config.timeout)?;
    let response = client.send_chat_completion(&request).await?;

    let output_format = if args.json {
        OutputFormat::Json
    } else if args.raw {
        OutputFormat::Raw
    } else {
        config.output_format
    };

    let text = format::format_chat_response(&response, output_format)?;
    match output_format {
        // Raw output is for piping; no trailing newline is added
        OutputFormat::Raw => print!("{text}"),
        _ => println!("{text}"),
    }
    Ok(())
}

async fn run_list(args: ListArgs, api_key_override: Option<String>) -> Result<(), CliError> {
    let config = load_config_with_override(api_key_override)?;
    if config.api_key.is_empty() {
        return Err(CliError::MissingApiKey);
    }

    debug!(base_url = %config.api_base_url, "fetching models");
    let client = ApiClient::new(&config.api_base_url, &config.api_key, config.timeout)?;
    let models = client.list_models().await?;

    let models: Vec<_> = models
        .into_iter()
        .filter(|model| !config.is_model_unavailable(&model.id))
        .collect();
    let models = format::filter_models(models, args.filter.as_deref());

    if models.is_empty() {
        format::print_error("No models found");
        if args.filter.is_some() {
            eprintln!("Try searching without filters or with different keywords");
        }
        return Ok(());
    }

    let output_format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Pretty
    };
    print!("{}", format::format_model_list(&models, output_format)?);
    if output_format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn run_config(action: ConfigCommands) -> Result<(), CliError> {
    match action {
        ConfigCommands::Get { key } => config_get(&key),
        ConfigCommands::Set { key, value } => config_set(&key, &value),
        ConfigCommands::Show => config_show(),
        ConfigCommands::AddUnavailable { model_id } => config_add_unavailable(&model_id),
        ConfigCommands::RemoveUnavailable { model_id } => config_remove_unavailable(&model_id),
        ConfigCommands::ListUnavailable => config_list_unavailable(),
    }
}

fn config_get(key: &str) -> Result<(), CliError> {
    let config = app::load_config()?;

    match key {
        "api_key" => println!("{}", format::mask_api_key(&config.api_key)),
        "default_model" => println!("{}", config.default_model),
        "default_temperature" => println!("{}", config.default_temperature),
        "default_max_tokens" => println!("{}", config.default_max_tokens),
        "output_format" => println!("{}", config.output_format),
        "api_base_url" => println!("{}", config.api_base_url),
        "timeout" => println!("{}", config.timeout),
        "unavailable_models" => {
            if config.unavailable_models.is_empty() {
                println!("(none)");
            } else {
                for model in &config.unavailable_models {
                    println!("{model}");
                }
            }
        }
        _ => {
            return Err(CliError::Validation(format!("unknown config key: {key}")));
        }
    }
    Ok(())
}

fn config_set(key: &str, value: &str) -> Result<(), CliError> {
    let mut config = app::load_config()?;
    config.set_value(key, value)?;
    app::save_config(&config)?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn config_show() -> Result<(), CliError> {
    let config = app::load_config()?;

    println!("Configuration:");
    println!("  API Key: {}", format::mask_api_key(&config.api_key));
    println!("  Default Model: {}", config.default_model);
    println!("  Default Temperature: {}", config.default_temperature);
    println!("  Default Max Tokens: {}", config.default_max_tokens);
    println!("  Output Format: {}", config.output_format);
    println!("  API Base URL: {}", config.api_base_url);
    println!("  Timeout: {} seconds", config.timeout);
    println!("  Unavailable Models: {}", config.unavailable_models.len());
    if !config.unavailable_models.is_empty() {
        println!("    {}", config.unavailable_models.join(", "));
    }
    println!("  Config File: {}", app::config_path().display());
    Ok(())
}

fn config_add_unavailable(model_id: &str) -> Result<(), CliError> {
    let mut config = app::load_config()?;
    config.add_unavailable_model(model_id)?;
    app::save_config(&config)?;
    println!("✓ Marked {model_id} as unavailable");
    Ok(())
}

fn config_remove_unavailable(model_id: &str) -> Result<(), CliError> {
    let mut config = app::load_config()?;
    config.remove_unavailable_model(model_id)?;
    app::save_config(&config)?;
    println!("✓ Removed {model_id} from unavailable list");
    Ok(())
}

fn config_list_unavailable() -> Result<(), CliError> {
    let config = app::load_config()?;

    if config.unavailable_models.is_empty() {
        println!("No unavailable models configured.");
        return Ok(());
    }

    println!("Unavailable models (filtered from 'openrouter list'):");
    for (index, model) in config.unavailable_models.iter().enumerate() {
        println!("  {}. {}", index + 1, model);
    }
    Ok(())
}
