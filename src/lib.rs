//! A terminal assistant that walks users through installing Ollama.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation session, prompt assembly, response
//!   generation and credential resolution.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop.
//! - [`api`] defines the chat-completion payloads exchanged with the service.
//! - [`cli`] parses arguments and dispatches to the chat loop or one-shot
//!   commands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
