//! Storage seam for the codefile service.
//!
//! The host platform owns real persistence; this crate defines the
//! narrow interface the service consumes ([`FileStore`]) and ships an
//! in-process implementation ([`MemoryStore`]) that backs the service
//! binary and its tests. Anything else plugs in behind the trait.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use codefile_core::deps::DependencySource;
use codefile_core::error::CoreError;
use codefile_core::file::{CodeFile, Page};
use codefile_core::types::{FileId, FileKind};

/// Fields for creating a file.
///
/// Dependencies are persisted separately, after sanitization -- never
/// from raw input.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub kind: FileKind,
    pub title: String,
    pub body: String,
    pub global: bool,
}

/// Partial update for a file; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FileUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub global: Option<bool>,
}

/// One page of dependency-picker search results.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSearchPage {
    /// Total matches across all pages.
    pub total: usize,
    /// Matches for the requested page, id order.
    pub files: Vec<CodeFile>,
}

/// Storage interface consumed by the service.
///
/// Implementations supply [`DependencySource`] as well, so the cycle
/// guard can walk adjacency rows through the same handle.
#[async_trait]
pub trait FileStore: DependencySource {
    /// Create a live file with an empty dependency list.
    async fn create_file(&self, input: NewFile) -> Result<CodeFile, CoreError>;

    /// Apply a partial update and bump the modification time. A title or
    /// body change records a revision copy of the previous state first.
    /// Returns `None` for an unknown id.
    async fn update_file(&self, id: FileId, update: FileUpdate)
        -> Result<Option<CodeFile>, CoreError>;

    async fn file(&self, id: FileId) -> Result<Option<CodeFile>, CoreError>;

    /// Live (non-revision) files of every kind, id order.
    async fn list_files(&self) -> Result<Vec<CodeFile>, CoreError>;

    /// Revisions recorded for a file, oldest first.
    async fn revisions_of(&self, id: FileId) -> Result<Vec<CodeFile>, CoreError>;

    /// Paginated picker search over live files of one kind, id order,
    /// optionally excluding one id. `page` is 1-based.
    async fn search_files(
        &self,
        kind: FileKind,
        page: usize,
        per_page: usize,
        exclude: Option<FileId>,
    ) -> Result<FileSearchPage, CoreError>;

    /// Remove a file and its dependency row. Stored lists elsewhere may
    /// keep referencing the id; the downstream resolver drops what it
    /// cannot resolve. Returns `false` for an unknown id.
    async fn delete_file(&self, id: FileId) -> Result<bool, CoreError>;

    /// Replace the stored dependency list wholesale. Writes the row even
    /// for ids without a file entity, matching the host metadata store.
    async fn set_dependencies(&self, id: FileId, dependencies: Vec<FileId>)
        -> Result<(), CoreError>;

    async fn create_page(&self, title: String) -> Result<Page, CoreError>;

    async fn page(&self, id: FileId) -> Result<Option<Page>, CoreError>;

    /// Replace both page selection lists wholesale. No cycle check
    /// applies here: nothing can depend on a page. Returns `None` for an
    /// unknown id.
    async fn set_page_dependencies(
        &self,
        id: FileId,
        css: Vec<FileId>,
        js: Vec<FileId>,
    ) -> Result<Option<Page>, CoreError>;
}
