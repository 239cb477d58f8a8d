//! Infrastructure adapters: history log, document rendering, archival.
//!
//! Everything here performs IO on behalf of the pure dialogue and pricing
//! crates. Archival is best effort: failures are reported as values, not panics.

pub mod archive;
pub mod document;
pub mod history;

pub use archive::{ArchiveOutcome, ArchiveReport, Archiver};
pub use document::{render_summary, DocumentRef, DocumentRenderer, RenderError, TextFileRenderer};
pub use history::{
    CompletedOrderRecord, HistoryError, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore,
};
