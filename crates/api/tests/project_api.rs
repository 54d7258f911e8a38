//! HTTP-level tests for project endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use clientdesk_db::memory::MemoryStore;
use common::{body_json, build_test_app, create_client, create_project, delete, get};
use common::{patch_json, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_project_under_missing_client_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let response = post_json(
        build_test_app(&store),
        "/api/v1/clients/77/projects",
        json!({ "name": "Orphan", "currency": "USD" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Client with id 77 not found");
}

#[tokio::test]
async fn project_with_end_before_start_fails_on_end_date() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;

    let response = post_json(
        build_test_app(&store),
        &format!("/api/v1/clients/{client_id}/projects"),
        json!({
            "name": "Backwards",
            "currency": "USD",
            "start_date": "2024-05-01",
            "end_date": "2024-04-01",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["field_errors"]["end_date"],
        "End date must be on or after the start date"
    );
}

#[tokio::test]
async fn project_requires_currency_and_positive_budget() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;

    let response = post_json(
        build_test_app(&store),
        &format!("/api/v1/clients/{client_id}/projects"),
        json!({ "name": "Cheap", "budget": 0, "currency": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["field_errors"]["budget"].is_string());
    assert!(json["field_errors"]["currency"].is_string());
}

#[tokio::test]
async fn list_by_client_returns_projects_in_creation_order() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;
    create_project(&store, client_id, json!({ "name": "First", "currency": "USD" })).await;
    create_project(&store, client_id, json!({ "name": "Second", "currency": "USD" })).await;

    let response = get(
        build_test_app(&store),
        &format!("/api/v1/clients/{client_id}/projects"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "First");
    assert_eq!(json["data"][1]["name"], "Second");
}

#[tokio::test]
async fn update_and_set_status() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;
    let id = create_project(&store, client_id, json!({ "name": "Site", "currency": "USD" })).await;

    let response = put_json(
        build_test_app(&store),
        &format!("/api/v1/projects/{id}"),
        json!({ "name": "Site v2", "budget": 900.5, "currency": "gbp" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = patch_json(
        build_test_app(&store),
        &format!("/api/v1/projects/{id}/status"),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(&store), &format!("/api/v1/projects/{id}")).await).await;
    let data = &json["data"];
    assert_eq!(data["name"], "Site v2");
    assert_eq!(data["currency"], "GBP");
    assert_eq!(data["budget"], 900.5);
    assert_eq!(data["status"], "completed");
    assert_eq!(data["tasks"], json!([]));
}

#[tokio::test]
async fn archived_project_leaves_client_stats() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;
    let id = create_project(
        &store,
        client_id,
        json!({ "name": "Site", "budget": 400, "currency": "USD" }),
    )
    .await;

    let response = delete(build_test_app(&store), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(
        get(build_test_app(&store), &format!("/api/v1/clients/{client_id}")).await,
    )
    .await;
    assert_eq!(json["data"]["projects_count"], 0);
    assert_eq!(json["data"]["total_budget"], 0.0);

    let response = delete(build_test_app(&store), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_archive_projects() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;
    let a = create_project(&store, client_id, json!({ "name": "A", "currency": "USD" })).await;
    let b = create_project(&store, client_id, json!({ "name": "B", "currency": "USD" })).await;

    let response = post_json(
        build_test_app(&store),
        "/api/v1/projects/archive",
        json!({ "ids": [a, b] }),
    )
    .await;
    assert_eq!(body_json(response).await["count"], 2);

    let json = body_json(
        get(
            build_test_app(&store),
            &format!("/api/v1/clients/{client_id}/projects"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn blank_optional_fields_are_stored_as_null() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;

    let id = create_project(
        &store,
        client_id,
        json!({
            "name": "Draft",
            "currency": "USD",
            "budget": "",
            "start_date": "",
            "end_date": "",
        }),
    )
    .await;

    let data = body_json(get(build_test_app(&store), &format!("/api/v1/projects/{id}")).await)
        .await["data"]
        .clone();
    assert_eq!(data["budget"], json!(null));
    assert_eq!(data["start_date"], json!(null));
    assert_eq!(data["end_date"], json!(null));
}

#[tokio::test]
async fn unreadable_body_returns_failed_result() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;

    let response = post_json(
        build_test_app(&store),
        &format!("/api/v1/clients/{client_id}/projects"),
        json!({ "name": "Site", "currency": "USD", "budget": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("budget"));
    assert!(json.get("id").is_none());
}

#[tokio::test]
async fn non_ascii_currency_is_a_field_error() {
    let store = Arc::new(MemoryStore::new());
    let client_id = create_client(&store, "Acme", 1).await;

    let response = post_json(
        build_test_app(&store),
        &format!("/api/v1/clients/{client_id}/projects"),
        json!({ "name": "Site", "currency": "ßßß", "budget": 5 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["field_errors"]["currency"],
        "Currency may only contain letters A-Z"
    );
    let detail = body_json(
        get(build_test_app(&store), &format!("/api/v1/clients/{client_id}")).await,
    )
    .await;
    assert_eq!(detail["data"]["projects"], json!([]));
}
