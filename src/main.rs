use clap::Parser;

use openrouter_cli::cli::{self, Cli};
use openrouter_cli::utils::{init_logger, CliError};

// Missing-key setup failures exit distinctly from ordinary command failures.
const EXIT_FAILURE: i32 = 1;
const EXIT_SETUP: i32 = 2;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_logger(args.verbose);

    if let Err(err) = cli::handle_command(args).await {
        match &err {
            CliError::MissingApiKey => {
                cli::print_error("No API key found");
                cli::print_setup_instructions();
                std::process::exit(EXIT_SETUP);
            }
            CliError::Api(api_err) => {
                cli::print_api_error(api_err);
                std::process::exit(EXIT_FAILURE);
            }
            _ => {
                cli::print_error(&err.to_string());
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}
