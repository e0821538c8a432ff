//! Terminal UI for the interactive assistant.
//!
//! - [`chat_loop`]: terminal setup, key handling and the turn loop.
//! - [`renderer`]: frame layout (header, transcript, sidebar, banner, input).
//! - [`markdown`]: assistant replies rendered as styled lines.
//! - [`theme`]: the single default palette.
//!
//! The UI only presents and captures interaction; [`crate::core::app::App`]
//! owns the session and the generator.

pub mod chat_loop;
pub mod markdown;
pub mod renderer;
pub mod theme;
