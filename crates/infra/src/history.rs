//! Append-only history of completed orders.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use workact_catalog::WorkItems;
use workact_core::RecordId;

use crate::document::DocumentRef;

/// A finalized, priced order. Immutable once archived.
///
/// Field names match the on-disk history format (`total` is the labor total,
/// `file` the rendered document). Totals are written as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedOrderRecord {
    #[serde(default)]
    pub id: RecordId,
    pub date: String,
    pub name: String,
    pub address: String,
    pub works: WorkItems,
    #[serde(rename = "total", with = "rust_decimal::serde::arbitrary_precision")]
    pub labor_total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub materials_total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub grand_total: Decimal,
    #[serde(rename = "file")]
    pub document: DocumentRef,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
}

/// History store error.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage error: {0}")]
    Storage(String),
}

/// History store abstraction.
pub trait HistoryStore: Send + Sync {
    /// Append one record to the end of the log.
    fn append(&self, record: CompletedOrderRecord) -> Result<(), HistoryError>;

    /// Read the whole log, oldest first.
    ///
    /// `None` means nothing has ever been written; `Some(vec![])` is an
    /// existing but empty log.
    fn load_all(&self) -> Result<Option<Vec<CompletedOrderRecord>>, HistoryError>;

    /// The last `limit` records, oldest first.
    fn recent(&self, limit: usize) -> Result<Option<Vec<CompletedOrderRecord>>, HistoryError> {
        Ok(self.load_all()?.map(|mut records| {
            let start = records.len().saturating_sub(limit);
            records.split_off(start)
        }))
    }
}

/// History kept as a pretty-printed JSON array in a single file.
///
/// Appends are read-modify-write under a process-local lock.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read(&self) -> Result<Option<Vec<CompletedOrderRecord>>, HistoryError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let records = serde_json::from_str(&raw).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(records))
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(&self, record: CompletedOrderRecord) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut records = self.read()?.unwrap_or_default();
        records.push(record);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| HistoryError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "history appended");
        Ok(())
    }

    fn load_all(&self) -> Result<Option<Vec<CompletedOrderRecord>>, HistoryError> {
        self.read()
    }
}

/// In-memory history store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Option<Vec<CompletedOrderRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CompletedOrderRecord>) -> Self {
        Self {
            records: RwLock::new(Some(records)),
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, record: CompletedOrderRecord) -> Result<(), HistoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| HistoryError::Storage("lock poisoned".to_string()))?;
        records.get_or_insert_with(Vec::new).push(record);
        Ok(())
    }

    fn load_all(&self) -> Result<Option<Vec<CompletedOrderRecord>>, HistoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| HistoryError::Storage("lock poisoned".to_string()))?;
        Ok(records.clone())
    }
}
