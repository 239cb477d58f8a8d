//! Per-conversation session storage.

use std::collections::HashMap;
use std::sync::RwLock;

use workact_core::ConversationId;

use crate::effect::Transition;
use crate::input::Input;
use crate::session::{DialogueContext, Session};

/// In-memory sessions keyed by conversation.
///
/// Sessions that reach `End` are dropped, so a finished or cancelled dialogue
/// leaves no draft behind.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<ConversationId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a conversation's session, if one is active.
    pub fn get(&self, conversation: ConversationId) -> Option<Session> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(&conversation).cloned()
    }

    /// Feed an input to the conversation's session, creating it if needed.
    pub fn advance(
        &self,
        conversation: ConversationId,
        ctx: &DialogueContext,
        input: &Input,
    ) -> Transition {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let mut session = sessions.remove(&conversation).unwrap_or_default();
        let transition = session.advance(ctx, input);
        if !session.state().is_terminal() {
            sessions.insert(conversation, session);
        }
        transition
    }

    pub fn active_count(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use workact_catalog::electrical_works;

    use crate::state::DialogueState;

    fn ctx() -> DialogueContext {
        DialogueContext::new(
            Arc::new(electrical_works().unwrap()),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn conversations_are_isolated() {
        let store = SessionStore::new();
        let ctx = ctx();
        let a = ConversationId::new(1);
        let b = ConversationId::new(2);

        store.advance(a, &ctx, &Input::Start);
        store.advance(a, &ctx, &Input::Text("Олена".to_string()));
        store.advance(b, &ctx, &Input::Start);

        assert_eq!(store.get(a).unwrap().state(), DialogueState::AwaitAddress);
        assert_eq!(store.get(b).unwrap().state(), DialogueState::AwaitName);
        assert_eq!(store.get(a).unwrap().draft().unwrap().customer_name, "Олена");
        assert_eq!(store.active_count(), 2);
    }

    #[test]
    fn cancelled_session_is_dropped() {
        let store = SessionStore::new();
        let ctx = ctx();
        let id = ConversationId::new(7);

        store.advance(id, &ctx, &Input::Start);
        store.advance(id, &ctx, &Input::Cancel);

        assert!(store.get(id).is_none());
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn input_without_session_creates_nothing() {
        let store = SessionStore::new();
        let t = store.advance(ConversationId::new(3), &ctx(), &Input::Text("hi".to_string()));
        assert!(t.effects.is_empty());
        assert_eq!(store.active_count(), 0);
    }
}
