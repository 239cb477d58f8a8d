//! Commands that live outside the order dialogue.

use workact_ai::{CompletionClient, CompletionRequest};
use workact_infra::{DocumentRenderer, HistoryStore};

use crate::messages;
use crate::transport::Reply;

/// How many of the latest records `/history` shows.
pub const HISTORY_LIMIT: usize = 10;

pub fn history(store: &dyn HistoryStore) -> Reply {
    match store.recent(HISTORY_LIMIT) {
        Ok(None) => Reply::text(messages::HISTORY_ABSENT),
        Ok(Some(records)) if records.is_empty() => Reply::text(messages::HISTORY_EMPTY),
        Ok(Some(records)) => messages::history_listing(&records),
        Err(e) => {
            tracing::error!(error = %e, "failed to read history");
            Reply::text(messages::HISTORY_UNAVAILABLE)
        }
    }
}

/// Index from a `get_<k>` callback, if `data` is one.
pub fn parse_history_callback(data: &str) -> Option<usize> {
    let digits = data.strip_prefix(messages::HISTORY_CALLBACK_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Re-deliver the document of the `index`-th record in the recent listing.
pub fn fetch_document(
    store: &dyn HistoryStore,
    renderer: &dyn DocumentRenderer,
    index: usize,
) -> Reply {
    let record = match store.recent(HISTORY_LIMIT) {
        Ok(records) => records.and_then(|mut r| (index < r.len()).then(|| r.swap_remove(index))),
        Err(e) => {
            tracing::error!(error = %e, "failed to read history");
            None
        }
    };

    match record {
        Some(record) if renderer.exists(&record.document) => Reply::Document(record.document),
        Some(record) => {
            tracing::warn!(document = %record.document, "archived document is missing");
            Reply::text(messages::DOCUMENT_NOT_FOUND)
        }
        None => {
            tracing::warn!(index, "history index out of range");
            Reply::text(messages::DOCUMENT_NOT_FOUND)
        }
    }
}

/// Validated `/ask_gpt` question, or the usage hint.
pub fn question(args: &str) -> Result<CompletionRequest, Reply> {
    CompletionRequest::new(args.trim()).map_err(|_| Reply::text(messages::ASK_USAGE))
}

/// The answer, or the error relayed inline.
pub async fn answer(client: &dyn CompletionClient, request: CompletionRequest) -> Reply {
    match client.complete(request).await {
        Ok(answer) => Reply::Text(answer),
        Err(e) => {
            tracing::warn!(error = %e, "completion failed");
            Reply::Text(messages::ai_error(&e))
        }
    }
}
