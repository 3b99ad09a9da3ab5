//! Documents and NLP HTTP API tests.
//!
//! Run with: `cargo test -p docflow-api --test documents_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use helpers::fixtures::{self, CSV, PDF};
use helpers::{api_path, TestPipeline};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use uuid::Uuid;

fn file_form(data: bytes::Bytes, filename: &str, content_type: &str) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name(filename)
        .mime_type(content_type);
    MultipartForm::new().add_part("file", part)
}

async fn upload(client: &TestServer, data: bytes::Bytes, filename: &str, content_type: &str) -> Value {
    let response = client
        .post(&api_path("/documents"))
        .multipart(file_form(data, filename, content_type))
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

fn id_of(body: &Value) -> Uuid {
    Uuid::parse_str(body["id"].as_str().expect("Expected 'id' in response"))
        .expect("Invalid UUID in response")
}

#[tokio::test]
async fn test_upload_get_list_delete_workflow() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::pdf_bytes(), "q3 report.pdf", PDF).await;
    let id = id_of(&body);
    assert_eq!(body["content_type"], PDF);
    assert_eq!(body["original_filename"], "q3_report.pdf");
    assert_eq!(body["file_size"], fixtures::pdf_bytes().len());
    assert_eq!(body["text"], fixtures::extracted_content().text);
    assert_eq!(body["metadata"]["page_count"], 3);
    assert!(body["filename"].as_str().unwrap().ends_with(".pdf"));
    // Internal storage details are not exposed
    assert!(body.get("storage_key").is_none());

    let response = client.get(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 200);
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], body["id"]);
    assert_eq!(fetched["text"], body["text"]);

    let response = client.get(&api_path("/documents")).await;
    assert_eq!(response.status_code(), 200);
    let listed: Vec<Value> = response.json();
    assert_eq!(listed.len(), 1);

    let response = client.delete(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 204);

    let response = client.get(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 404);

    let response = client.delete(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let response = client.get(&api_path("/documents")).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_upload_unsupported_type_is_415() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let response = client
        .post(&api_path("/documents"))
        .multipart(file_form(
            bytes::Bytes::from_static(b"\x89PNG\r\n"),
            "photo.png",
            "image/png",
        ))
        .await;

    assert_eq!(response.status_code(), 415);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
    assert!(body["error"].as_str().unwrap().contains("image/png"));
    assert_eq!(t.storage.puts(), 0);
    assert_eq!(t.parser.call_count(), 0);
}

#[tokio::test]
async fn test_upload_accepts_filenames_with_repeated_dots() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::pdf_bytes(), "report..v2.pdf", PDF).await;
    assert_eq!(body["original_filename"], "report..v2.pdf");
    assert_eq!(t.repository.row_count(), 1);
    assert_eq!(t.parser.call_count(), 1);
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = client.post(&api_path("/documents")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_parse_failure_is_500_and_leaves_nothing() {
    let t = TestPipeline::new();
    t.parser.fail.store(true, Ordering::SeqCst);
    let client = t.server(false);

    let response = client
        .post(&api_path("/documents"))
        .multipart(file_form(fixtures::csv_bytes(), "sheet.csv", CSV))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPLOAD_FAILED");
    assert!(body["error"].as_str().unwrap().contains("document parsing"));
    // Outside production the parser's own error is passed through
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("unable to partition document"));
    assert_eq!(t.storage.object_count(), 0);
    assert_eq!(t.repository.row_count(), 0);
}

#[tokio::test]
async fn test_get_invalid_uuid_is_400() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let response = client.get(&api_path("/documents/not-a-uuid")).await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_download_headers_and_body() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::csv_bytes(), "sheet.csv", CSV).await;
    let id = id_of(&body);

    let response = client
        .get(&api_path(&format!("/documents/{}/download", id)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/octet-stream");
    assert_eq!(
        response.header("content-disposition"),
        format!("attachment; filename=\"document_{}.csv\"", id).as_str()
    );
    assert_eq!(response.as_bytes().as_ref(), fixtures::csv_bytes().as_ref());
}

#[tokio::test]
async fn test_download_missing_object_is_storage_inconsistency() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::pdf_bytes(), "a.pdf", PDF).await;
    let id = id_of(&body);
    let storage_key = t.repository.row(id).unwrap().storage_key;
    t.storage.remove_object(&storage_key);

    let response = client
        .get(&api_path(&format!("/documents/{}/download", id)))
        .await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_INCONSISTENCY");

    let response = client
        .get(&api_path(&format!("/documents/{}/download", Uuid::new_v4())))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_storage_failure_is_delete_failed() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::pdf_bytes(), "a.pdf", PDF).await;
    let id = id_of(&body);
    t.storage.fail_delete.store(true, Ordering::SeqCst);

    let response = client.delete(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "DELETE_FAILED");
    assert!(body["details"].as_str().unwrap().contains("access denied"));

    // Record is still there for a retry
    let response = client.get(&api_path(&format!("/documents/{}", id))).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_reparse_endpoint() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let body = upload(&client, fixtures::pdf_bytes(), "a.pdf", PDF).await;
    let id = id_of(&body);
    t.parser.set_content(docflow_core::models::ExtractedContent {
        text: "Second pass".to_string(),
        metadata: fixtures::metadata(json!({"page_count": 5})),
    });

    let response = client
        .post(&api_path(&format!("/documents/{}/reparse", id)))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["text"], "Second pass");
    assert_eq!(body["metadata"]["page_count"], 5);

    let response = client
        .post(&api_path(&format!("/documents/{}/reparse", Uuid::new_v4())))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_nlp_routes_without_engine_are_503() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let response = client
        .post(&api_path("/nlp/search"))
        .json(&json!({"question": "What changed in Q3?"}))
        .await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn test_nlp_routes_forward_to_engine() {
    let t = TestPipeline::new();
    let client = t.server(true);

    let response = client
        .post(&api_path("/nlp/search"))
        .json(&json!({"question": "What changed in Q3?"}))
        .await;
    assert_eq!(response.status_code(), 200);
    let answer: String = response.json();
    assert_eq!(answer, "Answer to: What changed in Q3?");

    let response = client
        .post(&api_path("/nlp/sentiment"))
        .json(&json!({"text": "Great quarter"}))
        .await;
    assert_eq!(response.status_code(), 200);
    let sentiment: docflow_core::models::Sentiment = response.json();
    assert_eq!(sentiment.label, "positive");
    assert_eq!(sentiment.score, 0.93);

    let response = client
        .post(&api_path("/nlp/entities"))
        .json(&json!({"text": "ACME opened an office in Paris"}))
        .await;
    assert_eq!(response.status_code(), 200);
    let entities: Vec<String> = response.json();
    assert_eq!(entities, vec!["Paris".to_string(), "ACME".to_string()]);
}

#[tokio::test]
async fn test_nlp_validation_and_engine_errors() {
    let t = TestPipeline::new();
    let client = t.server(true);

    let response = client
        .post(&api_path("/nlp/search"))
        .json(&json!({"question": "why"}))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .post(&api_path("/nlp/search"))
        .json(&json!({"text": "wrong field"}))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .post(&api_path("/nlp/search"))
        .json(&json!({"question": "please fail now"}))
        .await;
    assert_eq!(response.status_code(), 502);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let t = TestPipeline::new();
    let client = t.server(false);

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["answer_engine"], "not_configured");

    let response = client.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let openapi: Value = response.json();
    assert!(openapi["paths"]["/api/v0/documents/{id}"].is_object());
}
