//! Order-capture dialogue (state machine).
//!
//! This crate contains the conversation rules for recording a work order,
//! implemented purely as deterministic logic (no IO, no transport, no storage).
//! The caller feeds [`Input`]s and executes the returned [`Effect`]s.

pub mod effect;
pub mod error;
pub mod input;
pub mod session;
pub mod state;
pub mod store;

pub use effect::{Effect, Prompt, Transition};
pub use error::DialogueError;
pub use input::{Input, FINISH_OPTION, MANUAL_DATE_OPTION, TODAY_OPTION};
pub use session::{DialogueContext, DialogueEvent, Session};
pub use state::{DialogueState, OrderDraft};
pub use store::SessionStore;
