//! Route definitions for the dependency picker.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dependency_query;
use crate::state::AppState;

/// Picker routes mounted at `/dependency-query`.
///
/// ```text
/// POST   /         -> dependency_query
/// GET    /nonce    -> mint_nonce
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(dependency_query::dependency_query))
        .route("/nonce", get(dependency_query::mint_nonce))
}
