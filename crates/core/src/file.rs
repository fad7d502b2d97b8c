//! File and page entities.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FileKind, Timestamp};

/// An admin-authored CSS/JS file stored as a content entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFile {
    pub id: FileId,
    pub kind: FileKind,
    /// Filename-like display title (e.g. `site.css`).
    pub title: String,
    /// Raw text content, served verbatim.
    pub body: String,
    /// Always enqueue on the frontend, regardless of page selections.
    pub global: bool,
    /// Ordered ids of files that must load before this one. Stored
    /// sanitized; raw editor input never lands here directly.
    pub dependencies: Vec<FileId>,
    /// `Some(parent)` when this entry is a historical revision of
    /// `parent`. Revisions are not served and not listed in pickers, but
    /// count as their parent for dependency-cycle purposes.
    pub revision_of: Option<FileId>,
    pub modified: Timestamp,
}

impl CodeFile {
    /// Whether this entry is a stored revision rather than a live file.
    pub fn is_revision(&self) -> bool {
        self.revision_of.is_some()
    }
}

/// A host page carrying its own per-kind dependency selections.
///
/// Page selections are resolved and enqueued unconditionally; the cycle
/// guard never applies to them because nothing can depend on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: FileId,
    pub title: String,
    /// Styles enqueued for this page, in selection order.
    pub css_dependencies: Vec<FileId>,
    /// Scripts enqueued for this page, in selection order.
    pub js_dependencies: Vec<FileId>,
    pub modified: Timestamp,
}

/// Cache-busting version token derived from a last-modified time.
///
/// The token changes whenever the entity is saved, so registered asset
/// URLs get a fresh cache key on every edit.
pub fn version_token(modified: &Timestamp) -> String {
    modified.format("%Y%m%d%H%M%S").to_string()
}
