/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;
mod format;

pub use args::{ChatArgs, Cli, Commands, ConfigCommands, ListArgs};
pub use commands::handle_command;
pub use format::{
    filter_models, format_chat_response, format_model_list, mask_api_key, print_api_error,
    print_error, print_setup_instructions, OutputFormat,
};
