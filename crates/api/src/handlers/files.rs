//! Handlers for file entities: authoring CRUD, the dependency-sanitizing
//! save path, and raw content serving.
//!
//! The save path is the one place dependency lists enter the system.
//! Submitted candidates run through the cycle sanitizer and only the
//! accepted remainder is persisted; refusals are reported in the
//! response but never fail the save.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use codefile_core::content;
use codefile_core::deps::{sanitize_dependencies, DependencySource, RejectedDependency};
use codefile_core::error::CoreError;
use codefile_core::file::CodeFile;
use codefile_core::types::{FileId, FileKind};
use codefile_store::{FileStore, FileUpdate, NewFile};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// One year, for the raw-serving cache header pair.
const CACHE_LIFETIME_SECS: i64 = 31_536_000;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateFileRequest {
    pub kind: FileKind,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub global: bool,
    /// Submitted dependency selection; sanitized before persisting.
    #[serde(default)]
    pub dependencies: Vec<FileId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFileRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub global: Option<bool>,
    /// Submitted dependency selection; replaces the stored list
    /// wholesale after sanitization. Absent means "leave unchanged".
    pub dependencies: Option<Vec<FileId>>,
}

/// Save result: the persisted file plus the candidates the sanitizer
/// refused, with reasons.
#[derive(Debug, Serialize)]
pub struct SavedFile {
    pub file: CodeFile,
    pub rejected_dependencies: Vec<RejectedDependency>,
}

// ---------------------------------------------------------------------------
// Authoring CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/files
///
/// Create a file. The title doubles as the display filename and must not
/// be empty; CSS bodies are stripped of markup before storage.
pub async fn create_file(
    State(state): State<AppState>,
    Json(input): Json<CreateFileRequest>,
) -> AppResult<impl IntoResponse> {
    let title = validated_title(&input.title)?;
    let body = content::sanitize_body(input.kind, &input.body);

    let file = state
        .store
        .create_file(NewFile {
            kind: input.kind,
            title,
            body,
            global: input.global,
        })
        .await?;

    let source: &dyn DependencySource = state.store.as_ref();
    let outcome = sanitize_dependencies(source, file.id, &input.dependencies, None).await?;
    state
        .store
        .set_dependencies(file.id, outcome.accepted)
        .await?;

    let file = require_file(&state, file.id).await?;

    tracing::info!(
        file_id = file.id,
        kind = %file.kind,
        rejected = outcome.rejected.len(),
        "File created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SavedFile {
                file,
                rejected_dependencies: outcome.rejected,
            },
        }),
    ))
}

/// PUT /api/v1/files/{id}
///
/// Save a file. When `{id}` is a stored revision, submitted dependencies
/// are additionally checked against the revision's parent: a cycle
/// through the parent counts the same as one through the subject.
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    Json(input): Json<UpdateFileRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = require_file(&state, id).await?;
    let revision_parent = existing.revision_of;

    let title = input.title.as_deref().map(validated_title).transpose()?;
    let body = input
        .body
        .map(|body| content::sanitize_body(existing.kind, &body));

    state
        .store
        .update_file(
            id,
            FileUpdate {
                title,
                body,
                global: input.global,
            },
        )
        .await?;

    let mut rejected = Vec::new();
    if let Some(candidates) = input.dependencies {
        let source: &dyn DependencySource = state.store.as_ref();
        let outcome = sanitize_dependencies(source, id, &candidates, revision_parent).await?;
        state.store.set_dependencies(id, outcome.accepted).await?;
        rejected = outcome.rejected;
    }

    let file = require_file(&state, id).await?;

    tracing::info!(
        file_id = id,
        rejected = rejected.len(),
        "File saved",
    );

    Ok(Json(DataResponse {
        data: SavedFile {
            file,
            rejected_dependencies: rejected,
        },
    }))
}

/// GET /api/v1/files
///
/// List all live files, id order.
pub async fn list_files(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let files = state.store.list_files().await?;

    Ok(Json(DataResponse { data: files }))
}

/// GET /api/v1/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> AppResult<impl IntoResponse> {
    let file = require_file(&state, id).await?;

    Ok(Json(DataResponse { data: file }))
}

/// GET /api/v1/files/{id}/revisions
///
/// Stored revisions of a file, oldest first.
pub async fn list_revisions(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> AppResult<impl IntoResponse> {
    require_file(&state, id).await?;
    let revisions = state.store.revisions_of(id).await?;

    Ok(Json(DataResponse { data: revisions }))
}

/// DELETE /api/v1/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.delete_file(id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "File", id }));
    }

    tracing::info!(file_id = id, "File deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Raw content serving
// ---------------------------------------------------------------------------

/// GET /api/v1/files/{id}/raw
///
/// Serve the stored body verbatim with a kind-derived content type and a
/// one-year cache header pair. The consumer is a `<link>`/`<script>`
/// tag, not an API client, so malformed or unknown ids terminate with an
/// empty body instead of a structured error payload.
pub async fn serve_raw(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<FileId>() else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let file = match state.store.file(id).await {
        Ok(Some(file)) => file,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            tracing::error!(file_id = id, error = %err, "Raw file lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Revisions are history, not servable assets.
    if file.is_revision() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let expires = (Utc::now() + chrono::Duration::seconds(CACHE_LIFETIME_SECS))
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();

    (
        [
            (header::CONTENT_TYPE, file.kind.content_type().to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={CACHE_LIFETIME_SECS}"),
            ),
            (header::EXPIRES, expires),
        ],
        file.body,
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a file or map its absence to a 404.
async fn require_file(state: &AppState, id: FileId) -> AppResult<CodeFile> {
    state
        .store
        .file(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "File", id }))
}

/// Trim and reject empty display titles.
fn validated_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    Ok(title.to_string())
}
