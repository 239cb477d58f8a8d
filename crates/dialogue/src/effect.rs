use workact_catalog::WorkType;

use crate::state::{DialogueState, OrderDraft};

/// What the operator should be asked or told next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    AskName,
    AskAddress,
    /// Date question with the today/manual keyboard.
    AskDate,
    /// Free-text date entry after choosing the manual option.
    EnterDate,
    /// Catalog menu; `first` is the opening menu right after the date.
    WorkMenu { first: bool },
    AskQuantity(WorkType),
    InvalidQuantity,
    /// Digits were fine but the number does not fit a quantity.
    QuantityTooLarge,
    UnknownWork(String),
    Cancelled,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Prompt(Prompt),
    /// Price and archive this draft, then feed back [`crate::Input::Archived`].
    Finalize(OrderDraft),
}

/// Result of feeding one input: `(state, input) → (new state, effects)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: DialogueState,
    pub to: DialogueState,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn prompts(&self) -> impl Iterator<Item = &Prompt> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Prompt(p) => Some(p),
            Effect::Finalize(_) => None,
        })
    }

    pub fn finalized_draft(&self) -> Option<&OrderDraft> {
        self.effects.iter().find_map(|e| match e {
            Effect::Finalize(draft) => Some(draft),
            Effect::Prompt(_) => None,
        })
    }
}
