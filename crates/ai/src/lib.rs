//! `workact-ai`
//!
//! **Responsibility:** optional question-answering boundary.
//!
//! This crate is intentionally **not** part of the order dialogue:
//! - It must not depend on dialogue or pricing types.
//! - It never touches session state.
//! - It relays text to an external completion service and returns text.

pub mod client;
pub mod http;
pub mod result;

pub use client::{CompletionClient, CompletionRequest, StaticCompletionClient};
pub use http::{HttpCompletionClient, HttpCompletionConfig};
pub use result::AiError;
