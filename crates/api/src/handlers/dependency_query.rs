//! Dependency-picker query endpoint.
//!
//! Backs the editor's dependency select control. Any precondition
//! failure -- bad nonce, missing or unknown subject, unsupported kind --
//! comes back in the same shape as an empty result set, so the control
//! degrades to "no options" instead of surfacing an error.

use axum::extract::State;
use axum::Json;
use codefile_core::types::{FileId, FileKind};
use codefile_store::FileStore;
use serde::{Deserialize, Serialize};

use crate::auth::nonce::{create_nonce, verify_nonce};
use crate::state::AppState;

/// Nonce action scoping picker requests.
pub const NONCE_ACTION: &str = "dependency-query";

/// Picker page size.
const PER_PAGE: usize = 10;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DependencyQueryRequest {
    /// File being edited; the picker queries on its behalf.
    pub post_id: Option<FileId>,
    pub nonce: Option<String>,
    pub kind: Option<String>,
    /// 1-based result page.
    pub page: Option<usize>,
    /// Leave the subject itself out of the options.
    pub exclude_current: bool,
}

#[derive(Debug, Serialize)]
pub struct DependencyQueryResponse {
    pub total: usize,
    pub posts: Vec<PostOption>,
}

/// One selectable option in the picker.
#[derive(Debug, Serialize)]
pub struct PostOption {
    pub id: FileId,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct NonceResponse {
    pub nonce: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/dependency-query
pub async fn dependency_query(
    State(state): State<AppState>,
    Json(input): Json<DependencyQueryRequest>,
) -> Json<DependencyQueryResponse> {
    let refused = || {
        Json(DependencyQueryResponse {
            total: 0,
            posts: Vec::new(),
        })
    };

    let Some(nonce) = input.nonce.as_deref() else {
        return refused();
    };
    if !verify_nonce(nonce, NONCE_ACTION, &state.config.nonce) {
        return refused();
    }

    // Edit check: the subject must exist. Possession of a mint-on-edit
    // nonce plus a resolvable subject stands in for the host capability
    // lookup.
    let Some(post_id) = input.post_id else {
        return refused();
    };
    match state.store.file(post_id).await {
        Ok(Some(_)) => {}
        _ => return refused(),
    }

    let Some(kind) = input.kind.as_deref().and_then(|k| k.parse::<FileKind>().ok()) else {
        return refused();
    };

    let page = input.page.unwrap_or(1).max(1);
    let exclude = input.exclude_current.then_some(post_id);

    match state
        .store
        .search_files(kind, page, PER_PAGE, exclude)
        .await
    {
        Ok(result) => Json(DependencyQueryResponse {
            total: result.total,
            posts: result
                .files
                .into_iter()
                .map(|file| PostOption {
                    id: file.id,
                    text: file.title,
                })
                .collect(),
        }),
        Err(err) => {
            tracing::error!(error = %err, "Dependency query failed");
            refused()
        }
    }
}

/// GET /api/v1/dependency-query/nonce
///
/// Mint the token the editor embeds in picker requests.
pub async fn mint_nonce(State(state): State<AppState>) -> Json<NonceResponse> {
    Json(NonceResponse {
        nonce: create_nonce(NONCE_ACTION, &state.config.nonce),
    })
}
