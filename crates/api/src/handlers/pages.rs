//! Handlers for page entities and the frontend resolution pass.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codefile_core::error::CoreError;
use codefile_core::frontend::{enqueue_page_files, register_files};
use codefile_core::types::FileId;
use codefile_store::FileStore;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageDependenciesRequest {
    /// Style selections, in enqueue order.
    pub css: Vec<FileId>,
    /// Script selections, in enqueue order.
    pub js: Vec<FileId>,
}

/// POST /api/v1/pages
pub async fn create_page(
    State(state): State<AppState>,
    Json(input): Json<CreatePageRequest>,
) -> AppResult<impl IntoResponse> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }

    let page = state.store.create_page(title.to_string()).await?;

    tracing::info!(page_id = page.id, "Page created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// GET /api/v1/pages/{id}
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .store
        .page(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    Ok(Json(DataResponse { data: page }))
}

/// PUT /api/v1/pages/{id}/dependencies
///
/// Replace the page's style and script selections wholesale. Pages
/// cannot be depended upon, so no cycle check applies here.
pub async fn set_page_dependencies(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    Json(input): Json<PageDependenciesRequest>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .store
        .set_page_dependencies(id, input.css, input.js)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    tracing::info!(
        page_id = id,
        styles = page.css_dependencies.len(),
        scripts = page.js_dependencies.len(),
        "Page selections saved",
    );

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/pages/{id}/assets
///
/// Frontend resolution: register every live file into fresh per-kind
/// registries, enqueue the global ones, then the page's own selections.
/// The response hands the registered tuples and enqueue queue to the
/// downstream resolver, which owns topological ordering.
pub async fn page_assets(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .store
        .page(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    let files = state.store.list_files().await?;
    let mut assets = register_files(&files, &state.config.public_base_url, None);
    enqueue_page_files(&mut assets, &page);

    Ok(Json(DataResponse { data: assets }))
}
