//! Tests for the client CSV export endpoint.

mod common;

use std::sync::Arc;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use chrono::Utc;
use clientdesk_db::memory::MemoryStore;
use common::{body_text, build_test_app, client_json, create_client, create_project, get};
use common::post_json;
use serde_json::json;

#[tokio::test]
async fn export_sends_attachment_with_dated_filename() {
    let store = Arc::new(MemoryStore::new());
    create_client(&store, "Acme", 1).await;

    let response = get(build_test_app(&store), "/api/v1/clients/export").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let today = Utc::now().date_naive().format("%Y-%m-%d");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"clients-export-{today}.csv\"")
    );
}

#[tokio::test]
async fn export_writes_header_and_quoted_rows() {
    let store = Arc::new(MemoryStore::new());
    let mut body = client_json("Acme", 1);
    body["notes"] = json!("Prefers \"formal\" tone");
    post_json(build_test_app(&store), "/api/v1/clients", body).await;

    let csv = body_text(get(build_test_app(&store), "/api/v1/clients/export").await).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"Name\",\"Status\",\"Email\",\"Phone\",\"Website\",\"Projects\",\"Total Budget\",\
         \"Currency\",\"Created\",\"Earliest Project\",\"Latest Project\",\"Notes\""
    );
    let record = lines.next().unwrap();
    assert!(record.starts_with("\"Acme\",\"active\",\"contact1@example.test\""));
    assert!(record.ends_with("\"Prefers \"\"formal\"\" tone\""));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn export_honours_filters_but_not_pagination() {
    let store = Arc::new(MemoryStore::new());
    for n in 0..3 {
        create_client(&store, &format!("Client {n}"), n).await;
    }
    let id = create_client(&store, "Zed", 9).await;
    create_project(
        &store,
        id,
        json!({ "name": "Big", "budget": 5000, "currency": "EUR", "start_date": "2024-02-01" }),
    )
    .await;

    let csv = body_text(
        get(build_test_app(&store), "/api/v1/clients/export?page_size=1").await,
    )
    .await;
    assert_eq!(csv.lines().count(), 5);

    let csv = body_text(
        get(build_test_app(&store), "/api/v1/clients/export?search=zed").await,
    )
    .await;
    let record = csv.lines().nth(1).unwrap();
    assert!(record.contains("\"1\",\"5000\",\"EUR\""));
    assert!(record.contains("\"2024-02-01\""));
}
