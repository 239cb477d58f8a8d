//! Best-effort archival of finalized orders.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use workact_core::RecordId;
use workact_dialogue::OrderDraft;
use workact_pricing::PricedOrder;

use crate::document::{render_summary, DocumentRef, DocumentRenderer};
use crate::history::{CompletedOrderRecord, HistoryStore};

/// How archiving went. Never blocks reporting the priced summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Archived(CompletedOrderRecord),
    /// Rendering or history append failed; logged and otherwise ignored.
    Failed { reason: String },
}

/// Everything the operator gets back after finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub summary: String,
    pub document: Option<DocumentRef>,
    pub outcome: ArchiveOutcome,
}

/// Renders the document and appends the record to the history log.
#[derive(Clone)]
pub struct Archiver {
    renderer: Arc<dyn DocumentRenderer>,
    history: Arc<dyn HistoryStore>,
}

impl Archiver {
    pub fn new(renderer: Arc<dyn DocumentRenderer>, history: Arc<dyn HistoryStore>) -> Self {
        Self { renderer, history }
    }

    pub fn renderer(&self) -> &Arc<dyn DocumentRenderer> {
        &self.renderer
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    pub fn archive(&self, draft: &OrderDraft, priced: &PricedOrder) -> ArchiveReport {
        self.archive_at(draft, priced, Local::now())
    }

    pub fn archive_at(
        &self,
        draft: &OrderDraft,
        priced: &PricedOrder,
        at: DateTime<Local>,
    ) -> ArchiveReport {
        let summary = render_summary(draft, priced);

        let document = match self.renderer.render(&summary, at) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "document rendering failed; order not archived");
                return ArchiveReport {
                    summary,
                    document: None,
                    outcome: ArchiveOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let record = CompletedOrderRecord {
            id: RecordId::new(),
            date: draft.date.clone(),
            name: draft.customer_name.clone(),
            address: draft.address.clone(),
            works: draft.works.clone(),
            labor_total: priced.labor_total,
            materials_total: priced.materials_total,
            grand_total: priced.grand_total,
            document: document.clone(),
            archived_at: Some(at.with_timezone(&Utc)),
        };

        let outcome = match self.history.append(record.clone()) {
            Ok(()) => {
                tracing::info!(
                    record_id = %record.id,
                    grand_total = %record.grand_total,
                    document = %document,
                    "order archived"
                );
                ArchiveOutcome::Archived(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "history append failed; order still reported");
                ArchiveOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        ArchiveReport {
            summary,
            document: Some(document),
            outcome,
        }
    }
}
