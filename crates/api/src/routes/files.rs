//! Route definitions for file entities.

use axum::routing::get;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// File routes mounted at `/files`.
///
/// ```text
/// GET    /                  -> list_files
/// POST   /                  -> create_file
/// GET    /{id}              -> get_file
/// PUT    /{id}              -> update_file
/// DELETE /{id}              -> delete_file
/// GET    /{id}/revisions    -> list_revisions
/// GET    /{id}/raw          -> serve_raw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(files::list_files).post(files::create_file))
        .route(
            "/{id}",
            get(files::get_file)
                .put(files::update_file)
                .delete(files::delete_file),
        )
        .route("/{id}/revisions", get(files::list_revisions))
        .route("/{id}/raw", get(files::serve_raw))
}
