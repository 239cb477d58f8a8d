use serde::{Deserialize, Serialize};

use workact_catalog::{WorkItems, WorkType};

/// Dialogue states.
///
/// `AwaitName → AwaitAddress → AwaitDate → CollectWork ⇄ AwaitQuantity → Finalize → End`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    AwaitName,
    AwaitAddress,
    AwaitDate,
    CollectWork,
    AwaitQuantity,
    Finalize,
    End,
}

impl DialogueState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DialogueState::End)
    }
}

/// The in-progress order being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub address: String,
    pub date: String,
    pub works: WorkItems,
    /// Work type awaiting a quantity; cleared once the quantity is recorded.
    pub pending_work: Option<WorkType>,
}
