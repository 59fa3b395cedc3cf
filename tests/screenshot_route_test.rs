//! End-to-end tests for the screenshot upload and download routes

mod common;

use common::{app_state, spawn_server, FakeDirectory, FakeLlm};
use didx_bot::models::ScreenshotSaved;
use didx_bot::screenshots::SCREENSHOT_FILE_NAME;
use reqwest::StatusCode;

const BOUNDARY: &str = "----didx-test-boundary";

/// Encode a single-file multipart body
fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(base_url: &str, field: &str, data: &[u8]) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/save_screenshot", base_url))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart_body(field, "capture.png", data))
        .send()
        .await
        .expect("upload failed")
}

async fn start(dir: &std::path::Path) -> String {
    spawn_server(app_state(
        FakeDirectory::missing(),
        FakeLlm::replying("unused"),
        dir,
    ))
    .await
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start(dir.path()).await;
    let image: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let response = upload(&base_url, "screenshot", &image).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved: ScreenshotSaved = response.json().await.unwrap();
    assert_eq!(saved.message, "Screenshot saved successfully");
    assert_eq!(
        saved.path,
        dir.path().join(SCREENSHOT_FILE_NAME).display().to_string()
    );

    let response = reqwest::get(format!("{}/screenshots/{}", base_url, SCREENSHOT_FILE_NAME))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"].to_str().unwrap(), "image/png");
    assert_eq!(response.bytes().await.unwrap().as_ref(), image.as_slice());
}

#[tokio::test]
async fn test_second_upload_overwrites_first() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start(dir.path()).await;

    assert_eq!(upload(&base_url, "screenshot", b"old image").await.status(), StatusCode::OK);
    assert_eq!(upload(&base_url, "screenshot", b"new image").await.status(), StatusCode::OK);

    let response = reqwest::get(format!("{}/screenshots/{}", base_url, SCREENSHOT_FILE_NAME))
        .await
        .unwrap();
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"new image");
}

#[tokio::test]
async fn test_upload_without_screenshot_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start(dir.path()).await;

    let response = upload(&base_url, "attachment", b"data").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing field screenshot");
    assert!(!dir.path().join(SCREENSHOT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = app_state(FakeDirectory::missing(), FakeLlm::replying("unused"), dir.path());
    state.screenshot_max_bytes = 1024;
    let base_url = spawn_server(state).await;

    let response = upload(&base_url, "screenshot", &[7u8; 4096]).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "payload too large");
    assert!(!dir.path().join(SCREENSHOT_FILE_NAME).exists());

    // A body under the limit still goes through
    let response = upload(&base_url, "screenshot", &[7u8; 256]).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = start(dir.path()).await;

    let response = reqwest::get(format!("{}/screenshots/absent.png", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hidden_and_traversal_names_are_not_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), b"OPENAI_API_KEY=sk-secret").unwrap();
    let base_url = start(dir.path()).await;

    for name in [".env", "..%2Fetc%2Fpasswd", "%2E%2E"] {
        let response = reqwest::get(format!("{}/screenshots/{}", base_url, name))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "served {:?}", name);
    }
}

#[tokio::test]
async fn test_other_files_in_directory_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("weekly-report.jpg"), b"jpeg bytes").unwrap();
    let base_url = start(dir.path()).await;

    let response = reqwest::get(format!("{}/screenshots/weekly-report.jpg", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"].to_str().unwrap(), "image/jpeg");
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"jpeg bytes");
}
