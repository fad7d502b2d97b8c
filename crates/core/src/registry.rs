//! Per-request asset registry boundary.
//!
//! Models the host platform's dependency-ordering asset loader: the
//! service registers `(handle, url, dependency-handles, version)` tuples
//! and marks some handles enqueued; topological ordering of the final
//! output belongs to the consumer. Registered dependency lists are
//! acyclic by construction (the save path sanitizes them), and the
//! consumer performs no cycle defense of its own.
//!
//! A registry is built fresh for each frontend request and discarded
//! with the response. There is no process-wide registry state.

use serde::Serialize;

use crate::types::FileId;

/// Prefix for all file handles in the registry.
pub const HANDLE_PREFIX: &str = "codefile-";

/// Stable registry handle for a file id.
pub fn file_handle(id: FileId) -> String {
    format!("{HANDLE_PREFIX}{id}")
}

/// One registered asset, ready for the downstream resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredAsset {
    pub handle: String,
    pub url: String,
    /// Handles that must load before this one.
    pub dependencies: Vec<String>,
    /// Cache-busting token derived from the entity's modification time.
    pub version: String,
}

/// Registry for one asset kind within one frontend request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetRegistry {
    registered: Vec<RegisteredAsset>,
    enqueued: Vec<String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset. A handle registers once; repeats are ignored.
    pub fn register(&mut self, asset: RegisteredAsset) {
        if !self.is_registered(&asset.handle) {
            self.registered.push(asset);
        }
    }

    /// Queue a handle for output, in first-enqueue order. Handles queue
    /// whether or not they are registered yet; the downstream resolver
    /// drops what it cannot resolve.
    pub fn enqueue(&mut self, handle: &str) {
        if !self.enqueued.iter().any(|h| h == handle) {
            self.enqueued.push(handle.to_string());
        }
    }

    pub fn is_registered(&self, handle: &str) -> bool {
        self.registered.iter().any(|a| a.handle == handle)
    }

    /// Registered assets in registration order.
    pub fn registered(&self) -> &[RegisteredAsset] {
        &self.registered
    }

    /// Enqueued handles in first-enqueue order.
    pub fn enqueued(&self) -> &[String] {
        &self.enqueued
    }
}
