//! Order document rendering.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use workact_dialogue::OrderDraft;
use workact_pricing::PricedOrder;

/// Handle to a rendered document that can be delivered again later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(PathBuf);

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl core::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a finished summary into a retrievable document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, summary: &str, at: DateTime<Local>) -> Result<DocumentRef, RenderError>;

    /// Whether the document is still available for re-delivery.
    fn exists(&self, document: &DocumentRef) -> bool;
}

/// Writes summaries as UTF-8 text files named `akt_<YYYYmmdd_HHMMSS>.txt`.
#[derive(Debug, Clone)]
pub struct TextFileRenderer {
    dir: PathBuf,
}

impl TextFileRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// First free file name for this timestamp (`_1`, `_2`, ... on collisions).
    fn target_path(&self, at: DateTime<Local>) -> PathBuf {
        let stem = format!("akt_{}", at.format("%Y%m%d_%H%M%S"));
        let mut path = self.dir.join(format!("{stem}.txt"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{stem}_{n}.txt"));
            n += 1;
        }
        path
    }
}

impl DocumentRenderer for TextFileRenderer {
    fn render(&self, summary: &str, at: DateTime<Local>) -> Result<DocumentRef, RenderError> {
        let io = |path: &Path, source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| io(&self.dir, e))?;
        let path = self.target_path(at);
        std::fs::write(&path, summary).map_err(|e| io(&path, e))?;

        tracing::debug!(path = %path.display(), "document rendered");
        Ok(DocumentRef::new(path))
    }

    fn exists(&self, document: &DocumentRef) -> bool {
        document.path().is_file()
    }
}

/// Material quantity as printed: one decimal place.
fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(1);
    rounded.rescale(1);
    rounded
}

/// Human-readable act of completed works.
pub fn render_summary(draft: &OrderDraft, priced: &PricedOrder) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "🧾 Акт виконаних робіт");
    let _ = writeln!(out, "Дата: {}", draft.date);
    let _ = writeln!(out, "Замовник: {}", draft.customer_name);
    let _ = writeln!(out, "Адреса: {}", draft.address);
    out.push('\n');

    for line in &priced.labor {
        let _ = writeln!(
            out,
            "{}: {} × {} = {} грн",
            line.work_type, line.quantity, line.unit_price, line.cost
        );
    }

    let _ = writeln!(out, "\n📦 Матеріали:");
    for line in &priced.materials {
        let _ = writeln!(
            out,
            "{}: {} {} × {} = {} грн",
            line.name,
            one_decimal(line.quantity),
            line.unit.label(),
            line.unit_price,
            line.cost
        );
    }

    let _ = writeln!(out, "\n💰 Робота: {} грн", priced.labor_total);
    let _ = writeln!(out, "🧾 Матеріали: {} грн", priced.materials_total);
    let _ = write!(out, "🔢 Загалом: {} грн", priced.grand_total);
    out
}
