pub mod dependency_query;
pub mod files;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /files                         list, create
/// /files/{id}                    get, save (sanitizes dependencies), delete
/// /files/{id}/revisions          stored revisions
/// /files/{id}/raw                raw body with cache headers (empty-body errors)
///
/// /dependency-query              picker query (nonce-gated, envelope failures)
/// /dependency-query/nonce        mint picker token
///
/// /pages                         create
/// /pages/{id}                    get
/// /pages/{id}/dependencies       replace style/script selections (PUT)
/// /pages/{id}/assets             frontend registration pass
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // File authoring, the sanitizing save path, and raw serving.
        .nest("/files", files::router())
        // Editor dependency picker.
        .nest("/dependency-query", dependency_query::router())
        // Pages and the frontend resolution pass.
        .nest("/pages", pages::router())
}
