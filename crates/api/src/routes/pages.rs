//! Route definitions for pages.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes mounted at `/pages`.
///
/// ```text
/// POST   /                     -> create_page
/// GET    /{id}                 -> get_page
/// PUT    /{id}/dependencies    -> set_page_dependencies
/// GET    /{id}/assets          -> page_assets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(pages::create_page))
        .route("/{id}", get(pages::get_page))
        .route("/{id}/dependencies", put(pages::set_page_dependencies))
        .route("/{id}/assets", get(pages::page_assets))
}
