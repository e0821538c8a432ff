//! Conversation state and response generation.
//!
//! - [`session`] is the ordered, in-memory conversation store.
//! - [`generator`] turns a conversation into the next assistant message and
//!   folds backend failures into a fallback reply.
//! - [`openai`] is the HTTP backend the generator talks to in production.
//! - [`app`] owns the pieces above for the interactive loop.

pub mod app;
pub mod catalog;
pub mod config;
pub mod generator;
pub mod message;
pub mod notice;
pub mod openai;
pub mod prompt;
pub mod session;
