use thiserror::Error;

use crate::state::DialogueState;

/// Rejected dialogue input. None of these mutate the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogueError {
    #[error("empty text is not accepted in {0:?}")]
    EmptyText(DialogueState),

    #[error("quantity must be digits only, got '{0}'")]
    InvalidQuantity(String),

    #[error("quantity '{0}' exceeds {max}", max = u32::MAX)]
    QuantityTooLarge(String),

    #[error("unknown work type '{0}'")]
    UnknownWorkType(String),

    /// No handler for this input in the current state; the input is dropped.
    #[error("input '{input}' is not expected in {state:?}")]
    Unexpected {
        state: DialogueState,
        input: &'static str,
    },
}
