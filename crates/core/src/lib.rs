//! `workact-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod machine;

pub use error::{DomainError, DomainResult};
pub use id::{ConversationId, OperatorId, RecordId};
pub use machine::StateMachine;
