//! End-to-end tests for the HTTP surface.
//!
//! Each test runs against a fresh app wired to its own temporary SQLite
//! file, exercising the full router (routes, extractors, error mapping)
//! the way a browser client would.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use formdeck_api::config::{AppConfig, DatabaseConfig};
use formdeck_api::database::FormStore;
use formdeck_api::server::create_app;

async fn test_server() -> (TestServer, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let config = AppConfig {
        database: DatabaseConfig {
            path: temp_file.path().to_path_buf(),
        },
        ..AppConfig::default()
    };
    let app = create_app(config).await.unwrap();
    (TestServer::new(app).unwrap(), temp_file)
}

/// Build a `{"responses": {...}}` body with dynamic field-id keys.
fn responses_body(entries: &[(&str, Value)]) -> Value {
    let mut map = serde_json::Map::new();
    for (field_id, answer) in entries {
        map.insert((*field_id).to_string(), answer.clone());
    }
    json!({ "responses": map })
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (server, _temp) = test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");

    let response = server.get("/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_create_fetch_submit_report_scenario() {
    let (server, _temp) = test_server().await;

    // Create
    let response = server
        .post("/forms")
        .json(&json!({
            "title": "Survey",
            "fields": [{"type": "text", "label": "Name"}],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_str().unwrap().to_string();
    let share_id = created["shareId"].as_str().unwrap().to_string();
    assert_ne!(id, share_id);

    // Fetch
    let response = server.get(&format!("/forms/{id}")).await;
    response.assert_status_ok();
    let form: Value = response.json();
    assert_eq!(form["title"], "Survey");
    let fields = form["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["label"], "Name");
    assert_eq!(fields[0]["type"], "text");
    let field_id = fields[0]["id"].as_str().unwrap().to_string();

    // Submit
    let response = server
        .post(&format!("/forms/{id}/submissions"))
        .json(&responses_body(&[(&field_id, json!("Alice"))]))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Submission successful");
    assert_eq!(body["submission"]["formId"], id.as_str());

    // Report
    let response = server.get(&format!("/forms/{id}/submissions")).await;
    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["formTitle"], "Survey");
    let submissions = report["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    let paired = submissions[0]["responses"].as_array().unwrap();
    assert_eq!(paired.len(), 1);
    assert_eq!(paired[0]["question"], "Name");
    assert_eq!(paired[0]["type"], "text");
    assert_eq!(paired[0]["answer"], "Alice");
}

#[tokio::test]
async fn test_create_preserves_field_count_and_order() {
    let (server, _temp) = test_server().await;

    let response = server
        .post("/forms")
        .json(&json!({
            "title": "Ordered",
            "description": "",
            "fields": [
                {"type": "text", "label": "First"},
                {"type": "number", "label": "Second"},
                {"type": "date", "label": "Third"},
                {"type": "radio", "label": "Fourth",
                 "options": [{"label": "Yes"}, {"label": "No"}]},
            ],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let fields = form["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);

    let labels: Vec<_> = fields.iter().map(|f| f["label"].as_str().unwrap()).collect();
    assert_eq!(labels, ["First", "Second", "Third", "Fourth"]);

    // Generated identifiers are distinct
    let mut ids: Vec<_> = fields.iter().map(|f| f["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn test_share_fetch_matches_primary_fetch() {
    let (server, _temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Shared",
            "fields": [
                {"type": "text", "label": "Q1"},
                {"type": "dropdown", "label": "Q2", "options": [{"label": "A"}]},
            ],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();
    let share_id = created["shareId"].as_str().unwrap();

    let by_id: Value = server.get(&format!("/forms/{id}")).await.json();
    let response = server.get(&format!("/forms/share/{share_id}")).await;
    response.assert_status_ok();
    let by_share: Value = response.json();

    assert_eq!(by_id["fields"], by_share["fields"]);
    assert_eq!(by_id["id"], by_share["id"]);
}

#[tokio::test]
async fn test_list_forms_empty_and_summary() {
    let (server, _temp) = test_server().await;

    // Empty store is a normal empty list, not an error
    let response = server.get("/forms").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));

    server
        .post("/forms")
        .json(&json!({
            "title": "One",
            "description": "first",
            "fields": [{"type": "text", "label": "Q"}],
        }))
        .await;
    server
        .post("/forms")
        .json(&json!({"title": "Two", "fields": []}))
        .await;

    let response = server.get("/forms").await;
    response.assert_status_ok();
    let list: Value = response.json();
    let entries = list.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Summary projection only: no fields in the listing
    assert_eq!(entries[0]["title"], "One");
    assert!(entries[0].get("fields").is_none());
    assert!(entries[0]["shareId"].is_string());
}

#[tokio::test]
async fn test_update_replaces_field_set() {
    let (server, _temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Before",
            "fields": [
                {"type": "text", "label": "Keep"},
                {"type": "text", "label": "Drop"},
            ],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let keep_id = form["fields"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/forms/{id}"))
        .json(&json!({
            "title": "After",
            "description": "updated",
            "fields": [
                {"type": "number", "label": "New first"},
                {"id": keep_id.as_str(), "type": "text", "label": "Keep renamed"},
            ],
        }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["title"], "After");

    let fields = updated["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["label"], "New first");
    assert_eq!(fields[1]["id"], keep_id.as_str());
    assert_eq!(fields[1]["label"], "Keep renamed");

    // The omitted field is really gone on a fresh read
    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let labels: Vec<_> = form["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["New first", "Keep renamed"]);
}

#[tokio::test]
async fn test_update_missing_form_is_not_found() {
    let (server, _temp) = test_server().await;

    let response = server
        .put("/forms/no-such-form")
        .json(&json!({"title": "X", "fields": []}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Form not found");
}

#[tokio::test]
async fn test_delete_cascades_and_404s_after() {
    let (server, temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Doomed",
            "fields": [{"type": "text", "label": "Q"}],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();
    let share_id = created["shareId"].as_str().unwrap().to_string();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let field_id = form["fields"][0]["id"].as_str().unwrap().to_string();
    server
        .post(&format!("/forms/{id}/submissions"))
        .json(&responses_body(&[(&field_id, json!("gone soon"))]))
        .await;

    let response = server.delete(&format!("/forms/{id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Form deleted successfully"
    );

    server
        .get(&format!("/forms/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/forms/share/{share_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    // The report is Not-Found too, not an empty report
    server
        .get(&format!("/forms/{id}/submissions"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    // Deleting again is Not-Found
    server
        .delete(&format!("/forms/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Submission rows are gone from the store as well
    let store = FormStore::new(temp.path()).await.unwrap();
    assert!(store.list_submissions(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_to_missing_form_writes_nothing() {
    let (server, temp) = test_server().await;

    let response = server
        .post("/forms/no-such-form/submissions")
        .json(&responses_body(&[("f-1", json!("ignored"))]))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Form not found");

    let store = FormStore::new(temp.path()).await.unwrap();
    assert!(store.list_submissions("no-such-form").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_checkbox_options_round_trip() {
    let (server, _temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Boxes",
            "fields": [{
                "type": "checkbox",
                "label": "Pick",
                "options": [
                    {"label": "A", "checked": false},
                    {"label": "B", "checked": true},
                ],
            }],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    assert_eq!(
        form["fields"][0]["options"],
        json!([
            {"label": "A", "checked": false},
            {"label": "B", "checked": true},
        ])
    );
}

#[tokio::test]
async fn test_report_null_fills_sparse_and_stale_answers() {
    let (server, _temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Sparse",
            "fields": [
                {"type": "text", "label": "Answered"},
                {"type": "checkbox", "label": "Skipped",
                 "options": [{"label": "A"}]},
            ],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let answered_id = form["fields"][0]["id"].as_str().unwrap().to_string();

    // One live answer plus one key that matches no current field
    server
        .post(&format!("/forms/{id}/submissions"))
        .json(&responses_body(&[
            (&answered_id, json!("yes")),
            ("stale-field", json!("orphan")),
        ]))
        .await
        .assert_status(StatusCode::CREATED);

    let report: Value = server.get(&format!("/forms/{id}/submissions")).await.json();
    let paired = report["submissions"][0]["responses"].as_array().unwrap();

    // One entry per current field, no more and no less
    assert_eq!(paired.len(), 2);
    assert_eq!(paired[0]["answer"], "yes");
    assert_eq!(paired[1]["answer"], Value::Null);
    assert_eq!(paired[1]["options"], json!([{"label": "A", "checked": false}]));
}

#[tokio::test]
async fn test_checkbox_answer_shape_survives_reporting() {
    let (server, _temp) = test_server().await;

    let created: Value = server
        .post("/forms")
        .json(&json!({
            "title": "Colors",
            "fields": [{
                "type": "checkbox",
                "label": "Pick some",
                "options": [{"label": "Red"}, {"label": "Blue"}],
            }],
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let form: Value = server.get(&format!("/forms/{id}")).await.json();
    let field_id = form["fields"][0]["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/forms/{id}/submissions"))
        .json(&responses_body(&[(
            &field_id,
            json!({"Red": true, "Blue": false}),
        )]))
        .await
        .assert_status(StatusCode::CREATED);

    let report: Value = server.get(&format!("/forms/{id}/submissions")).await.json();
    let paired = report["submissions"][0]["responses"].as_array().unwrap();
    assert_eq!(paired[0]["answer"], json!({"Red": true, "Blue": false}));
    assert_eq!(paired[0]["type"], "checkbox");
}

#[tokio::test]
async fn test_missing_form_fetches_are_not_found() {
    let (server, _temp) = test_server().await;

    let response = server.get("/forms/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Form not found");

    server
        .get("/forms/share/nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
