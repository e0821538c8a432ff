//! TUI-less "ask" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::app::{App, TurnStart};
use crate::core::config::ConfigurationError;
use crate::core::generator::ResponseGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskStatus {
    Answered,
    /// The completion failed and the fallback text was printed.
    Fallback,
    Unconfigured,
    EmptyPrompt,
}

impl AskStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            AskStatus::Answered | AskStatus::Fallback => 0,
            AskStatus::Unconfigured | AskStatus::EmptyPrompt => 1,
        }
    }
}

pub async fn run_ask(
    prompt: Vec<String>,
    generator: Result<ResponseGenerator, ConfigurationError>,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(generator);
    let status = ask(&mut app, &prompt.join(" "), &mut io::stdout(), &mut io::stderr()).await?;
    if status.exit_code() != 0 {
        std::process::exit(status.exit_code());
    }
    Ok(())
}

/// Run one turn through `app`, writing the reply to `out` and any notice to
/// `err`.
pub async fn ask<O: Write, E: Write>(
    app: &mut App,
    prompt: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<AskStatus> {
    let turn = match app.begin_turn(prompt) {
        TurnStart::Pending(turn) => turn,
        TurnStart::Blocked => {
            if let Some(notice) = app.latest_notice() {
                writeln!(err, "❌ {}", notice.text)?;
            }
            return Ok(AskStatus::Unconfigured);
        }
        TurnStart::Ignored | TurnStart::Reset => {
            writeln!(err, "Usage: ollama-assistant ask <prompt>")?;
            return Ok(AskStatus::EmptyPrompt);
        }
    };

    let outcome = turn.resolve().await;
    let fallback = outcome.is_fallback();
    let reply = app.complete_turn(outcome);
    writeln!(out, "{}", reply.content())?;

    if fallback {
        if let Some(notice) = app.latest_notice() {
            writeln!(err, "⚠️  {}", notice.text)?;
        }
        Ok(AskStatus::Fallback)
    } else {
        Ok(AskStatus::Answered)
    }
}
