//! Frontend registration pass.
//!
//! On every frontend request the full set of live files is registered
//! into fresh per-kind registries. Files flagged global (or switched on
//! by an activation hook) are enqueued eagerly; everything else loads
//! only transitively, through page selections or other enqueued files.

use serde::Serialize;

use crate::file::{version_token, CodeFile, Page};
use crate::registry::{file_handle, AssetRegistry, RegisteredAsset};
use crate::types::{FileId, FileKind};

/// Hook overriding whether a file is active regardless of its global
/// flag. Receives the default decision, the file's handle, and the file.
pub type ActivationHook<'a> = &'a dyn Fn(bool, &str, &CodeFile) -> bool;

/// Registries for one frontend request, one per asset kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontendAssets {
    pub styles: AssetRegistry,
    pub scripts: AssetRegistry,
}

impl FrontendAssets {
    fn registry_mut(&mut self, kind: FileKind) -> &mut AssetRegistry {
        match kind {
            FileKind::Css => &mut self.styles,
            FileKind::Js => &mut self.scripts,
        }
    }
}

/// Serving URL for a file's raw content.
pub fn file_url(base_url: &str, id: FileId) -> String {
    format!("{}/api/v1/files/{id}/raw", base_url.trim_end_matches('/'))
}

/// Register every live file and enqueue the eagerly-active ones.
///
/// Revisions are skipped: only canonical files are registered or served.
/// Version strings derive from each file's modification time, so handles
/// get a new cache key whenever content changes.
pub fn register_files(
    files: &[CodeFile],
    base_url: &str,
    activation: Option<ActivationHook>,
) -> FrontendAssets {
    let mut assets = FrontendAssets::default();

    for file in files.iter().filter(|f| !f.is_revision()) {
        let handle = file_handle(file.id);
        let registry = assets.registry_mut(file.kind);

        registry.register(RegisteredAsset {
            handle: handle.clone(),
            url: file_url(base_url, file.id),
            dependencies: file.dependencies.iter().copied().map(file_handle).collect(),
            version: version_token(&file.modified),
        });

        let mut active = file.global;
        if let Some(hook) = activation {
            active = hook(active, &handle, file);
        }
        if active {
            registry.enqueue(&handle);
        }
    }

    assets
}

/// Enqueue a page's own selections into already-built registries.
pub fn enqueue_page_files(assets: &mut FrontendAssets, page: &Page) {
    for id in &page.css_dependencies {
        assets.styles.enqueue(&file_handle(*id));
    }
    for id in &page.js_dependencies {
        assets.scripts.enqueue(&file_handle(*id));
    }
}
