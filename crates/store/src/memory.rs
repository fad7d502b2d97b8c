//! In-process store.
//!
//! Tables are plain maps behind one `RwLock`, with ids handed out from a
//! shared counter (files, revisions, and pages draw from the same id
//! space, like the host's content table). Dependency rows live in their
//! own map keyed by entity id, mirroring the host's metadata store: a
//! row can exist without an entity, and entity reads join the row in.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use codefile_core::deps::DependencySource;
use codefile_core::error::CoreError;
use codefile_core::file::{CodeFile, Page};
use codefile_core::types::{FileId, FileKind};

use crate::{FileSearchPage, FileStore, FileUpdate, NewFile};

#[derive(Default)]
struct Tables {
    files: HashMap<FileId, CodeFile>,
    dependencies: HashMap<FileId, Vec<FileId>>,
    pages: HashMap<FileId, Page>,
    next_id: FileId,
}

impl Tables {
    fn allocate_id(&mut self) -> FileId {
        self.next_id += 1;
        self.next_id
    }

    /// Join the dependency row into an entity clone.
    fn hydrate(&self, row: &CodeFile) -> CodeFile {
        let mut file = row.clone();
        file.dependencies = self.dependencies.get(&file.id).cloned().unwrap_or_default();
        file
    }
}

/// Map-backed [`FileStore`] suitable for a single host process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DependencySource for MemoryStore {
    async fn dependencies_of(&self, id: FileId) -> Result<Vec<FileId>, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        Ok(tables.dependencies.get(&id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn create_file(&self, input: NewFile) -> Result<CodeFile, CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        let id = tables.allocate_id();
        let file = CodeFile {
            id,
            kind: input.kind,
            title: input.title,
            body: input.body,
            global: input.global,
            dependencies: Vec::new(),
            revision_of: None,
            modified: Utc::now(),
        };
        tables.files.insert(id, file.clone());
        tracing::debug!(file_id = id, kind = %file.kind, "File row inserted");
        Ok(file)
    }

    async fn update_file(
        &self,
        id: FileId,
        update: FileUpdate,
    ) -> Result<Option<CodeFile>, CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        let Some(current) = tables.files.get(&id).cloned() else {
            return Ok(None);
        };

        // Content changes snapshot the previous state first. The copy is
        // saved under its own id with no dependency row; dependency saves
        // on a revision go through the sanitizer like any other save.
        if update.title.is_some() || update.body.is_some() {
            let revision_id = tables.allocate_id();
            let mut revision = current.clone();
            revision.id = revision_id;
            revision.revision_of = Some(id);
            tables.files.insert(revision_id, revision);
            tracing::debug!(file_id = id, revision_id, "Revision recorded");
        }

        let mut row = current;
        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(body) = update.body {
            row.body = body;
        }
        if let Some(global) = update.global {
            row.global = global;
        }
        row.modified = Utc::now();
        tables.files.insert(id, row.clone());

        tracing::debug!(file_id = id, "File row updated");
        Ok(Some(tables.hydrate(&row)))
    }

    async fn file(&self, id: FileId) -> Result<Option<CodeFile>, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        Ok(tables.files.get(&id).map(|row| tables.hydrate(row)))
    }

    async fn list_files(&self) -> Result<Vec<CodeFile>, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        let mut files: Vec<CodeFile> = tables
            .files
            .values()
            .filter(|row| !row.is_revision())
            .map(|row| tables.hydrate(row))
            .collect();
        files.sort_by_key(|file| file.id);
        Ok(files)
    }

    async fn revisions_of(&self, id: FileId) -> Result<Vec<CodeFile>, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        let mut revisions: Vec<CodeFile> = tables
            .files
            .values()
            .filter(|row| row.revision_of == Some(id))
            .map(|row| tables.hydrate(row))
            .collect();
        revisions.sort_by_key(|revision| revision.id);
        Ok(revisions)
    }

    async fn search_files(
        &self,
        kind: FileKind,
        page: usize,
        per_page: usize,
        exclude: Option<FileId>,
    ) -> Result<FileSearchPage, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        let mut matches: Vec<&CodeFile> = tables
            .files
            .values()
            .filter(|row| row.kind == kind && !row.is_revision() && Some(row.id) != exclude)
            .collect();
        matches.sort_by_key(|row| row.id);

        let total = matches.len();
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        let files = matches
            .into_iter()
            .skip(offset)
            .take(per_page)
            .map(|row| tables.hydrate(row))
            .collect();

        Ok(FileSearchPage { total, files })
    }

    async fn delete_file(&self, id: FileId) -> Result<bool, CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        let removed = tables.files.remove(&id).is_some();
        if removed {
            tables.dependencies.remove(&id);
            tracing::debug!(file_id = id, "File row deleted");
        }
        Ok(removed)
    }

    async fn set_dependencies(
        &self,
        id: FileId,
        dependencies: Vec<FileId>,
    ) -> Result<(), CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        tracing::debug!(file_id = id, count = dependencies.len(), "Dependency row replaced");
        tables.dependencies.insert(id, dependencies);
        Ok(())
    }

    async fn create_page(&self, title: String) -> Result<Page, CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        let id = tables.allocate_id();
        let page = Page {
            id,
            title,
            css_dependencies: Vec::new(),
            js_dependencies: Vec::new(),
            modified: Utc::now(),
        };
        tables.pages.insert(id, page.clone());
        tracing::debug!(page_id = id, "Page row inserted");
        Ok(page)
    }

    async fn page(&self, id: FileId) -> Result<Option<Page>, CoreError> {
        let tables = self.inner.read().expect("store lock poisoned");
        Ok(tables.pages.get(&id).cloned())
    }

    async fn set_page_dependencies(
        &self,
        id: FileId,
        css: Vec<FileId>,
        js: Vec<FileId>,
    ) -> Result<Option<Page>, CoreError> {
        let mut tables = self.inner.write().expect("store lock poisoned");
        let Some(page) = tables.pages.get_mut(&id) else {
            return Ok(None);
        };
        page.css_dependencies = css;
        page.js_dependencies = js;
        page.modified = Utc::now();
        tracing::debug!(page_id = id, "Page selections replaced");
        Ok(Some(page.clone()))
    }
}
