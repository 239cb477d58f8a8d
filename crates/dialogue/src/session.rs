use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use workact_catalog::{WorkCatalog, WorkItems, WorkType};
use workact_core::StateMachine;

use crate::effect::{Effect, Prompt, Transition};
use crate::error::DialogueError;
use crate::input::{Input, FINISH_OPTION, MANUAL_DATE_OPTION, TODAY_OPTION};
use crate::state::{DialogueState, OrderDraft};

/// Date format used when the operator picks "today".
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Read-only inputs to a transition besides the operator input itself.
#[derive(Debug, Clone)]
pub struct DialogueContext {
    pub catalog: Arc<WorkCatalog>,
    /// Resolves the "today" option; captured by the caller so transitions stay pure.
    pub today: NaiveDate,
}

impl DialogueContext {
    pub fn new(catalog: Arc<WorkCatalog>, today: NaiveDate) -> Self {
        Self { catalog, today }
    }
}

/// Facts emitted by the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueEvent {
    Started,
    NameRecorded { name: String },
    AddressRecorded { address: String },
    ManualDateRequested,
    DateRecorded { date: String },
    WorkSelected { work_type: WorkType },
    QuantityRecorded { work_type: WorkType, quantity: u32 },
    CollectionFinished,
    Archived,
    Cancelled,
}

/// One conversation's dialogue: current state plus the draft being built.
///
/// A draft exists exactly while the state is not `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: DialogueState,
    draft: Option<OrderDraft>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session that has not started (terminal, no draft).
    pub fn new() -> Self {
        Self {
            state: DialogueState::End,
            draft: None,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn draft(&self) -> Option<&OrderDraft> {
        self.draft.as_ref()
    }

    /// Feed one input and return the transition with its effects.
    ///
    /// Rejected inputs leave state and draft untouched; their effects are the
    /// re-prompts for the current state (possibly none).
    pub fn advance(&mut self, ctx: &DialogueContext, input: &Input) -> Transition {
        let from = self.state;
        let effects = match self.step(ctx, input) {
            Ok(events) => {
                let effects: Vec<Effect> =
                    events.iter().filter_map(|e| self.effect_for(e)).collect();
                tracing::debug!(?from, to = ?self.state, ?events, "dialogue transition");
                effects
            }
            Err(err) => {
                match &err {
                    DialogueError::Unexpected { .. } => {
                        tracing::debug!(state = ?from, "dropped input: {err}")
                    }
                    _ => tracing::warn!(state = ?from, "rejected input: {err}"),
                }
                rejection_effects(&err)
            }
        };

        Transition {
            from,
            to: self.state,
            effects,
        }
    }

    fn effect_for(&self, event: &DialogueEvent) -> Option<Effect> {
        let prompt = match event {
            DialogueEvent::Started => Prompt::AskName,
            DialogueEvent::NameRecorded { .. } => Prompt::AskAddress,
            DialogueEvent::AddressRecorded { .. } => Prompt::AskDate,
            DialogueEvent::ManualDateRequested => Prompt::EnterDate,
            DialogueEvent::DateRecorded { .. } => Prompt::WorkMenu { first: true },
            DialogueEvent::WorkSelected { work_type } => Prompt::AskQuantity(work_type.clone()),
            DialogueEvent::QuantityRecorded { .. } => Prompt::WorkMenu { first: false },
            DialogueEvent::CollectionFinished => {
                return self.draft.clone().map(Effect::Finalize);
            }
            DialogueEvent::Archived => return None,
            DialogueEvent::Cancelled => Prompt::Cancelled,
        };
        Some(Effect::Prompt(prompt))
    }

    fn unexpected(&self, input: &Input) -> DialogueError {
        DialogueError::Unexpected {
            state: self.state,
            input: input.kind(),
        }
    }

    fn require_text(&self, text: &str) -> Result<(), DialogueError> {
        if text.trim().is_empty() {
            return Err(DialogueError::EmptyText(self.state));
        }
        Ok(())
    }

    fn handle_date(&self, ctx: &DialogueContext, text: &str) -> Result<DialogueEvent, DialogueError> {
        self.require_text(text)?;
        let event = match text {
            TODAY_OPTION => DialogueEvent::DateRecorded {
                date: ctx.today.format(DATE_FORMAT).to_string(),
            },
            MANUAL_DATE_OPTION => DialogueEvent::ManualDateRequested,
            other => DialogueEvent::DateRecorded {
                date: other.to_string(),
            },
        };
        Ok(event)
    }

    fn handle_selection(
        &self,
        ctx: &DialogueContext,
        data: &str,
    ) -> Result<DialogueEvent, DialogueError> {
        if data == FINISH_OPTION {
            return Ok(DialogueEvent::CollectionFinished);
        }
        match ctx.catalog.get(data) {
            Some(entry) => Ok(DialogueEvent::WorkSelected {
                work_type: entry.work_type.clone(),
            }),
            None => Err(DialogueError::UnknownWorkType(data.to_string())),
        }
    }

    fn handle_quantity(&self, input: &Input, text: &str) -> Result<DialogueEvent, DialogueError> {
        let pending = self
            .draft
            .as_ref()
            .and_then(|d| d.pending_work.clone())
            .ok_or_else(|| self.unexpected(input))?;
        let quantity = parse_quantity(text)?;
        Ok(DialogueEvent::QuantityRecorded {
            work_type: pending,
            quantity,
        })
    }
}

impl StateMachine for Session {
    type Context = DialogueContext;
    type Input = Input;
    type Event = DialogueEvent;
    type Error = DialogueError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DialogueEvent::Started => {
                self.draft = Some(OrderDraft::default());
                self.state = DialogueState::AwaitName;
            }
            DialogueEvent::NameRecorded { name } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.customer_name = name.clone();
                }
                self.state = DialogueState::AwaitAddress;
            }
            DialogueEvent::AddressRecorded { address } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.address = address.clone();
                }
                self.state = DialogueState::AwaitDate;
            }
            DialogueEvent::ManualDateRequested => {}
            DialogueEvent::DateRecorded { date } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.date = date.clone();
                    draft.works = WorkItems::new();
                    draft.pending_work = None;
                }
                self.state = DialogueState::CollectWork;
            }
            DialogueEvent::WorkSelected { work_type } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.pending_work = Some(work_type.clone());
                }
                self.state = DialogueState::AwaitQuantity;
            }
            DialogueEvent::QuantityRecorded { work_type, quantity } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.works.record(work_type.clone(), *quantity);
                    draft.pending_work = None;
                }
                self.state = DialogueState::CollectWork;
            }
            DialogueEvent::CollectionFinished => {
                self.state = DialogueState::Finalize;
            }
            DialogueEvent::Archived | DialogueEvent::Cancelled => {
                self.draft = None;
                self.state = DialogueState::End;
            }
        }
    }

    fn handle(
        &self,
        ctx: &Self::Context,
        input: &Self::Input,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        use DialogueState as S;

        let event = match (self.state, input) {
            (_, Input::Start) => DialogueEvent::Started,
            (S::End, Input::Cancel) => return Err(self.unexpected(input)),
            (_, Input::Cancel) => DialogueEvent::Cancelled,
            (S::AwaitName, Input::Text(text)) => {
                self.require_text(text)?;
                DialogueEvent::NameRecorded { name: text.clone() }
            }
            (S::AwaitAddress, Input::Text(text)) => {
                self.require_text(text)?;
                DialogueEvent::AddressRecorded {
                    address: text.clone(),
                }
            }
            (S::AwaitDate, Input::Text(text)) => self.handle_date(ctx, text)?,
            (S::CollectWork, Input::Select(data)) => self.handle_selection(ctx, data)?,
            (S::AwaitQuantity, Input::Text(text)) => self.handle_quantity(input, text)?,
            (S::Finalize, Input::Archived) => DialogueEvent::Archived,
            _ => return Err(self.unexpected(input)),
        };

        Ok(vec![event])
    }
}

/// Quantity input: ASCII digits only, at least one, fitting in `u32`.
pub fn parse_quantity(text: &str) -> Result<u32, DialogueError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DialogueError::InvalidQuantity(text.to_string()));
    }
    text.parse::<u32>()
        .map_err(|_| DialogueError::QuantityTooLarge(text.to_string()))
}

fn rejection_effects(err: &DialogueError) -> Vec<Effect> {
    let prompts = match err {
        DialogueError::EmptyText(DialogueState::AwaitName) => vec![Prompt::AskName],
        DialogueError::EmptyText(DialogueState::AwaitAddress) => vec![Prompt::AskAddress],
        DialogueError::EmptyText(DialogueState::AwaitDate) => vec![Prompt::EnterDate],
        DialogueError::EmptyText(_) => vec![],
        DialogueError::InvalidQuantity(_) => vec![Prompt::InvalidQuantity],
        DialogueError::QuantityTooLarge(_) => vec![Prompt::QuantityTooLarge],
        DialogueError::UnknownWorkType(work) => vec![
            Prompt::UnknownWork(work.clone()),
            Prompt::WorkMenu { first: false },
        ],
        DialogueError::Unexpected { .. } => vec![],
    };
    prompts.into_iter().map(Effect::Prompt).collect()
}
