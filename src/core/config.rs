//! Credential resolution.
//!
//! The only runtime setting is the OpenAI API key. It is looked up in the
//! process environment first and then in a `.env` file in the working
//! directory. Model name, temperature and system directive are constants in
//! [`crate::core::prompt`].

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DOTENV_FILE: &str = ".env";

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("OpenAI API key is missing. Please set {var} in the environment or the .env file.")]
    MissingApiKey { var: &'static str },
    #[error("could not read {path:?}: {source}")]
    DotEnv {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve the API key from the real environment and `./.env`.
pub fn load_api_key() -> Result<ApiKey, ConfigurationError> {
    resolve_api_key(|name| std::env::var(name).ok(), Path::new(DOTENV_FILE))
}

/// Resolve the API key from `env`, falling back to the file at
/// `dotenv_path`. Blank values count as missing; a missing file is not an
/// error.
pub fn resolve_api_key(
    env: impl Fn(&str) -> Option<String>,
    dotenv_path: &Path,
) -> Result<ApiKey, ConfigurationError> {
    if let Some(key) = env(API_KEY_VAR).and_then(non_blank) {
        return Ok(ApiKey::new(key));
    }

    let mut vars = read_dotenv(dotenv_path)?;
    vars.remove(API_KEY_VAR)
        .and_then(non_blank)
        .map(ApiKey::new)
        .ok_or(ConfigurationError::MissingApiKey { var: API_KEY_VAR })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigurationError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_dotenv(&contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(source) => Err(ConfigurationError::DotEnv {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// optional `export ` prefix is accepted and matching surrounding quotes are
/// stripped from values. Later assignments win.
pub fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    vars
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
