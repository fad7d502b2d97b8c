use std::sync::Arc;

use codefile_store::FileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage seam. The host platform owns real persistence; the
    /// service only ever talks to this trait.
    pub store: Arc<dyn FileStore>,
    /// Server configuration (bind address, CORS, nonce secret).
    pub config: Arc<ServerConfig>,
}
