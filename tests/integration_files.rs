mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cartable::drive::DriveState;
use cartable::middleware::role::UserRole;
use common::{MemoryStore, MockProvider, ready_drive, setup_test_app, token_for};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

const BOUNDARY: &str = "------------------------cartable";

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let content_type = format!("multipart/form-data; boundary={}", BOUNDARY);
    (content_type, body)
}

fn teacher_token(provider: &MockProvider) -> String {
    let id = provider.add_user("prof@ecole.fr", "motdepasse1", UserRole::Enseignant);
    token_for(id, "prof@ecole.fr", UserRole::Enseignant)
}

#[tokio::test]
async fn test_upload_requires_token() {
    let provider = Arc::new(MockProvider::new());
    let app = setup_test_app(provider, ready_drive(Arc::new(MemoryStore::new())));

    let (content_type, body) = multipart_body("file", "cours.pdf", b"contenu");
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_with_disabled_storage_is_service_unavailable() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, DriveState::Disabled);

    let (content_type, body) = multipart_body("file", "cours.pdf", b"contenu");
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_upload_stores_file_and_returns_share_url() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let store = Arc::new(MemoryStore::new());
    let app = setup_test_app(provider, ready_drive(store.clone()));

    let (content_type, body) = multipart_body("file", "cours.pdf", b"contenu du cours");
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["fileName"], "cours.pdf");

    let file_id = body["fileId"].as_str().unwrap();
    assert!(store.contains(file_id));
    assert_eq!(
        body["fileUrl"],
        format!("https://drive.google.com/file/d/{}/view", file_id)
    );
}

#[tokio::test]
async fn test_upload_without_file_field_is_bad_request() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, ready_drive(Arc::new(MemoryStore::new())));

    let (content_type, body) = multipart_body("document", "cours.pdf", b"contenu");
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Aucun fichier fourni");
}

#[tokio::test]
async fn test_upload_empty_file_is_bad_request() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, ready_drive(Arc::new(MemoryStore::new())));

    let (content_type, body) = multipart_body("file", "vide.pdf", b"");
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_file_removes_stored_file() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let store = Arc::new(MemoryStore::new());
    store.add_file("abc123", "cours.pdf", b"contenu".to_vec());
    let app = setup_test_app(provider, ready_drive(store.clone()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/delete-file")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "fileId": "abc123" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Fichier supprimé avec succès");
    assert!(!store.contains("abc123"));
}

#[tokio::test]
async fn test_delete_unknown_file_is_not_found() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, ready_drive(Arc::new(MemoryStore::new())));

    let request = Request::builder()
        .method("POST")
        .uri("/api/delete-file")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "fileId": "inconnu" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Fichier introuvable chez le fournisseur");
}

#[tokio::test]
async fn test_delete_file_requires_file_id() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, ready_drive(Arc::new(MemoryStore::new())));

    let request = Request::builder()
        .method("POST")
        .uri("/api/delete-file")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "fileId is required");
}

#[tokio::test]
async fn test_delete_file_with_disabled_storage_is_service_unavailable() {
    let provider = Arc::new(MockProvider::new());
    let token = teacher_token(&provider);
    let app = setup_test_app(provider, DriveState::Disabled);

    let request = Request::builder()
        .method("POST")
        .uri("/api/delete-file")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "fileId": "abc123" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
