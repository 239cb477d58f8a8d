//! Chat transport boundary.

use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;

use workact_core::{ConversationId, OperatorId};
use workact_infra::DocumentRef;

/// What the operator sent, already split into command / text / option selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// `/name args...`
    Command { name: String, args: String },
    Text(String),
    /// Inline option callback data.
    Callback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub conversation: ConversationId,
    pub operator: OperatorId,
    pub payload: Payload,
}

impl IncomingMessage {
    pub fn command(
        conversation: ConversationId,
        operator: OperatorId,
        name: &str,
        args: &str,
    ) -> Self {
        Self {
            conversation,
            operator,
            payload: Payload::Command {
                name: name.to_string(),
                args: args.to_string(),
            },
        }
    }

    pub fn text(conversation: ConversationId, operator: OperatorId, text: &str) -> Self {
        Self {
            conversation,
            operator,
            payload: Payload::Text(text.to_string()),
        }
    }

    pub fn callback(conversation: ConversationId, operator: OperatorId, data: &str) -> Self {
        Self {
            conversation,
            operator,
            payload: Payload::Callback(data.to_string()),
        }
    }
}

/// Inline option shown under a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineOption {
    pub label: String,
    pub data: String,
}

impl InlineOption {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Text with a one-time single-choice reply keyboard.
    Keyboard { text: String, options: Vec<String> },
    /// Text with inline options (answered by callback data).
    Options { text: String, options: Vec<InlineOption> },
    /// Text that also removes any reply keyboard.
    RemoveKeyboard(String),
    Document(DocumentRef),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// The message text, if this reply carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Reply::Text(text)
            | Reply::Keyboard { text, .. }
            | Reply::Options { text, .. }
            | Reply::RemoveKeyboard(text) => Some(text),
            Reply::Document(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request/response chat transport.
#[async_trait]
pub trait Transport: Send {
    /// Next operator message; `None` once the transport is exhausted.
    async fn recv(&mut self) -> Result<Option<IncomingMessage>, TransportError>;

    async fn send(&mut self, conversation: ConversationId, reply: Reply) -> Result<(), TransportError>;
}

/// Scripted in-memory transport for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    inbox: VecDeque<IncomingMessage>,
    sent: Vec<(ConversationId, Reply)>,
}

impl MemoryTransport {
    pub fn new(script: impl IntoIterator<Item = IncomingMessage>) -> Self {
        Self {
            inbox: script.into_iter().collect(),
            sent: Vec::new(),
        }
    }

    pub fn sent(&self) -> &[(ConversationId, Reply)] {
        &self.sent
    }

    /// Drain everything sent so far.
    pub fn take_sent(&mut self) -> Vec<Reply> {
        self.sent.drain(..).map(|(_, reply)| reply).collect()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn recv(&mut self) -> Result<Option<IncomingMessage>, TransportError> {
        Ok(self.inbox.pop_front())
    }

    async fn send(&mut self, conversation: ConversationId, reply: Reply) -> Result<(), TransportError> {
        self.sent.push((conversation, reply));
        Ok(())
    }
}
