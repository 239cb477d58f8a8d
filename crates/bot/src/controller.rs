//! Routes operator messages to the dialogue and the side commands.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use workact_ai::CompletionClient;
use workact_auth::{authorize, Authorizer};
use workact_catalog::WorkCatalog;
use workact_core::ConversationId;
use workact_dialogue::{DialogueContext, Effect, Input, OrderDraft, SessionStore};
use workact_infra::{ArchiveOutcome, Archiver};
use workact_pricing::price_order;

use crate::commands;
use crate::messages;
use crate::transport::{IncomingMessage, Payload, Reply, Transport, TransportError};

/// Source of "today" for the date shortcut.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct Controller {
    authorizer: Arc<dyn Authorizer>,
    catalog: Arc<WorkCatalog>,
    sessions: SessionStore,
    archiver: Archiver,
    ai: Arc<dyn CompletionClient>,
    clock: Arc<dyn Clock>,
}

impl Controller {
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        catalog: Arc<WorkCatalog>,
        archiver: Archiver,
        ai: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            authorizer,
            catalog,
            sessions: SessionStore::new(),
            archiver,
            ai,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one message, sending every reply through `transport`.
    pub async fn handle<T>(
        &self,
        transport: &mut T,
        message: IncomingMessage,
    ) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        let conversation = message.conversation;
        let operator = message.operator;

        if authorize(self.authorizer.as_ref(), operator).is_err() {
            // Plain text and callbacks from strangers are not worth an answer.
            if let Payload::Command { name, .. } = &message.payload {
                let denial = if name == "ask_gpt" {
                    messages::ACCESS_DENIED_SHORT
                } else {
                    messages::ACCESS_DENIED
                };
                transport.send(conversation, Reply::text(denial)).await?;
            }
            return Ok(());
        }

        match message.payload {
            Payload::Command { name, args } => match name.as_str() {
                "start" => {
                    tracing::info!(%conversation, %operator, "dialogue started");
                    self.drive(transport, conversation, Input::Start).await
                }
                "cancel" => self.drive(transport, conversation, Input::Cancel).await,
                "history" => {
                    let reply = commands::history(self.archiver.history().as_ref());
                    transport.send(conversation, reply).await
                }
                "ask_gpt" => self.ask(transport, conversation, &args).await,
                other => {
                    tracing::debug!(command = other, "unknown command ignored");
                    Ok(())
                }
            },
            Payload::Callback(data) => match commands::parse_history_callback(&data) {
                Some(index) => {
                    let reply = commands::fetch_document(
                        self.archiver.history().as_ref(),
                        self.archiver.renderer().as_ref(),
                        index,
                    );
                    transport.send(conversation, reply).await
                }
                None => self.drive(transport, conversation, Input::Select(data)).await,
            },
            Payload::Text(text) => self.drive(transport, conversation, Input::Text(text)).await,
        }
    }

    async fn ask<T>(
        &self,
        transport: &mut T,
        conversation: ConversationId,
        args: &str,
    ) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        let request = match commands::question(args) {
            Ok(request) => request,
            Err(usage) => return transport.send(conversation, usage).await,
        };
        transport.send(conversation, Reply::text(messages::THINKING)).await?;
        let reply = commands::answer(self.ai.as_ref(), request).await;
        transport.send(conversation, reply).await
    }

    /// Feed one input to the conversation's dialogue and carry out its effects.
    async fn drive<T>(
        &self,
        transport: &mut T,
        conversation: ConversationId,
        input: Input,
    ) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        let ctx = DialogueContext::new(self.catalog.clone(), self.clock.today());
        let transition = self.sessions.advance(conversation, &ctx, &input);

        for effect in transition.effects {
            match effect {
                Effect::Prompt(prompt) => {
                    let reply = messages::prompt_reply(&prompt, &self.catalog);
                    transport.send(conversation, reply).await?;
                }
                Effect::Finalize(draft) => self.finalize(transport, conversation, &ctx, draft).await?,
            }
        }
        Ok(())
    }

    /// Price, report and archive a finished draft, then close the dialogue.
    async fn finalize<T>(
        &self,
        transport: &mut T,
        conversation: ConversationId,
        ctx: &DialogueContext,
        draft: OrderDraft,
    ) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        let priced = match price_order(&draft.works, &self.catalog) {
            Ok(priced) => priced,
            Err(e) => {
                tracing::error!(error = %e, %conversation, "pricing failed; dialogue dropped");
                // The cancellation notice would be misleading here.
                let _ = self.sessions.advance(conversation, ctx, &Input::Cancel);
                return transport.send(conversation, Reply::text(messages::PRICING_FAILED)).await;
            }
        };

        let report = self.archiver.archive(&draft, &priced);
        if let ArchiveOutcome::Failed { reason } = &report.outcome {
            tracing::warn!(%conversation, reason = %reason, "order reported without archive");
        }

        let closing = self.sessions.advance(conversation, ctx, &Input::Archived);
        tracing::info!(
            %conversation,
            grand_total = %priced.grand_total,
            state = ?closing.to,
            "order finalized"
        );

        transport.send(conversation, Reply::RemoveKeyboard(report.summary)).await?;
        if let Some(document) = report.document {
            transport.send(conversation, Reply::text(messages::DOCUMENT_CAPTION)).await?;
            transport.send(conversation, Reply::Document(document)).await?;
        }
        Ok(())
    }
}

/// Serve messages until the transport runs dry.
pub async fn run<T>(controller: &Controller, transport: &mut T) -> Result<(), TransportError>
where
    T: Transport + ?Sized,
{
    while let Some(message) = transport.recv().await? {
        if let Err(e) = controller.handle(transport, message).await {
            tracing::error!(error = %e, "failed to deliver reply");
        }
    }
    tracing::info!("transport closed; shutting down");
    Ok(())
}
