//! Command-line interface parsing and handling
//!
//! Parses arguments, resolves credentials once, and hands the resulting
//! generator (or the configuration error) to the selected command.

pub mod ask;
pub mod models;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::ask::run_ask;
use crate::cli::models::list_models;
use crate::core::config::{load_api_key, ConfigurationError};
use crate::core::generator::ResponseGenerator;
use crate::core::openai::OpenAiClient;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_file_logging, init_stderr_logging};

#[derive(Parser)]
#[command(name = "ollama-assistant")]
#[command(version)]
#[command(about = "A terminal assistant that helps you install Ollama and explore its models")]
#[command(
    long_about = "Ollama Installation Assistant is a full-screen terminal chat that answers \
questions about installing and running Ollama. Answers come from the OpenAI chat \
completions API; the model list in the sidebar is reference material only.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    Your OpenAI API key (also read from ./.env)\n\
  RUST_LOG          Log filter used with --debug-log\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Tab/Shift+Tab     Browse the model catalog\n\
  Esc               Clear the model selection\n\
  Up/Down/PgUp/PgDn Scroll the conversation\n\
  Ctrl+L or /reset  Reset the chat\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the model catalog and reference links
    Models,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

/// Build the generator from the configured credentials, or keep the error
/// so the caller can surface it.
pub fn build_generator() -> Result<ResponseGenerator, ConfigurationError> {
    let api_key = load_api_key()?;
    Ok(ResponseGenerator::new(Arc::new(OpenAiClient::new(api_key))))
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    match (&args.debug_log, &command) {
        (Some(path), _) => init_file_logging(path)?,
        // The TUI owns the terminal, so it only logs when asked to.
        (None, Commands::Chat) => {}
        (None, _) => init_stderr_logging()?,
    }

    match command {
        Commands::Chat => {
            let generator = build_generator();
            debug!(configured = generator.is_ok(), "starting chat");
            run_chat(generator).await
        }
        Commands::Ask { prompt } => run_ask(prompt, build_generator()).await,
        Commands::Models => list_models(),
    }
}
