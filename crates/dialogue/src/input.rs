use serde::{Deserialize, Serialize};

/// Reply-keyboard option that resolves to today's date.
pub const TODAY_OPTION: &str = "Сьогодні";
/// Reply-keyboard option asking to type the date by hand.
pub const MANUAL_DATE_OPTION: &str = "Ввести вручну";
/// Inline option that ends work collection.
pub const FINISH_OPTION: &str = "done";

/// Operator input, already classified by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Input {
    /// `/start`: (re)open the dialogue with a fresh draft.
    Start,
    /// `/cancel`: drop the draft without archiving.
    Cancel,
    /// Free text message.
    Text(String),
    /// Inline option selection (callback data).
    Select(String),
    /// Pricing and archiving of the finalized draft have run.
    Archived,
}

impl Input {
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Start => "start",
            Input::Cancel => "cancel",
            Input::Text(_) => "text",
            Input::Select(_) => "select",
            Input::Archived => "archived",
        }
    }
}
