//! HTTP-level integration tests for the dependency picker endpoint.
//!
//! The endpoint's contract is asymmetric on purpose: successes and
//! refusals share one shape, and a refusal is indistinguishable from an
//! empty result set.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, post_json, test_app};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_file(app: &Router, kind: &str, title: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/files",
        json!({ "kind": kind, "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["file"]["id"].as_i64().unwrap()
}

async fn mint_nonce(app: &Router) -> String {
    let json = body_json(get(app, "/api/v1/dependency-query/nonce").await).await;
    json["nonce"].as_str().unwrap().to_string()
}

/// Assert the structured refusal: HTTP 200 with an empty result shape.
async fn assert_refused(app: &Router, body: serde_json::Value) {
    let response = post_json(app, "/api/v1/dependency-query", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "total": 0, "posts": [] })
    );
}

// ---------------------------------------------------------------------------
// Successful queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_lists_files_of_the_requested_kind() {
    let (app, _store) = test_app();
    let a = create_file(&app, "css", "a.css").await;
    let b = create_file(&app, "css", "b.css").await;
    create_file(&app, "js", "app.js").await;

    let nonce = mint_nonce(&app).await;
    let response = post_json(
        &app,
        "/api/v1/dependency-query",
        json!({ "post_id": a, "nonce": nonce.as_str(), "kind": "css" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(
        json["posts"],
        json!([
            { "id": a, "text": "a.css" },
            { "id": b, "text": "b.css" },
        ])
    );
}

#[tokio::test]
async fn query_paginates_ten_per_page() {
    let (app, _store) = test_app();
    let subject = create_file(&app, "css", "subject.css").await;
    for n in 0..11 {
        create_file(&app, "css", &format!("extra-{n}.css")).await;
    }

    let nonce = mint_nonce(&app).await;
    let first = body_json(
        post_json(
            &app,
            "/api/v1/dependency-query",
            json!({ "post_id": subject, "nonce": nonce.as_str(), "kind": "css", "page": 1 }),
        )
        .await,
    )
    .await;
    assert_eq!(first["total"], 12);
    assert_eq!(first["posts"].as_array().unwrap().len(), 10);

    let second = body_json(
        post_json(
            &app,
            "/api/v1/dependency-query",
            json!({ "post_id": subject, "nonce": nonce.as_str(), "kind": "css", "page": 2 }),
        )
        .await,
    )
    .await;
    assert_eq!(second["posts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn exclude_current_drops_the_subject() {
    let (app, _store) = test_app();
    let subject = create_file(&app, "css", "subject.css").await;
    create_file(&app, "css", "other.css").await;

    let nonce = mint_nonce(&app).await;
    let json = body_json(
        post_json(
            &app,
            "/api/v1/dependency-query",
            json!({
                "post_id": subject,
                "nonce": nonce.as_str(),
                "kind": "css",
                "exclude_current": true,
            }),
        )
        .await,
    )
    .await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["posts"][0]["text"], "other.css");
}

// ---------------------------------------------------------------------------
// Structured refusals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_nonce_is_refused() {
    let (app, _store) = test_app();
    let id = create_file(&app, "css", "a.css").await;

    assert_refused(&app, json!({ "post_id": id, "kind": "css" })).await;
}

#[tokio::test]
async fn bad_nonce_is_refused() {
    let (app, _store) = test_app();
    let id = create_file(&app, "css", "a.css").await;

    assert_refused(
        &app,
        json!({ "post_id": id, "nonce": "ffffffffffffffff", "kind": "css" }),
    )
    .await;
}

#[tokio::test]
async fn missing_or_unknown_subject_is_refused() {
    let (app, _store) = test_app();
    create_file(&app, "css", "a.css").await;
    let nonce = mint_nonce(&app).await;

    assert_refused(&app, json!({ "nonce": nonce.as_str(), "kind": "css" })).await;
    assert_refused(
        &app,
        json!({ "post_id": 9999, "nonce": nonce.as_str(), "kind": "css" }),
    )
    .await;
}

#[tokio::test]
async fn unsupported_kind_is_refused() {
    let (app, _store) = test_app();
    let id = create_file(&app, "css", "a.css").await;
    let nonce = mint_nonce(&app).await;

    assert_refused(
        &app,
        json!({ "post_id": id, "nonce": nonce.as_str(), "kind": "scss" }),
    )
    .await;
    assert_refused(&app, json!({ "post_id": id, "nonce": nonce.as_str() })).await;
}
