//! Diagnostic logging setup.
//!
//! The chat loop owns the terminal, so tracing output only goes to a file
//! when one is requested with `--debug-log`. One-shot commands log errors to
//! stderr; failed completions are already reported there as notices.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILE_DIRECTIVE: &str = "ollama_assistant=debug";
const DEFAULT_STDERR_DIRECTIVE: &str = "ollama_assistant=error";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Append tracing output to `path`, creating the file if needed.
pub fn init_file_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILE_DIRECTIVE))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;

    Ok(())
}

/// Send errors to stderr. Used when no terminal UI is running.
pub fn init_stderr_logging() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_STDERR_DIRECTIVE))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;

    Ok(())
}
