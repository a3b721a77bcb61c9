//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use recstudio_api::router::build_router;
use recstudio_api::state::AppState;
use recstudio_core::config::AppConfig;
use recstudio_storage::local::LocalRecordingStore;

const BOUNDARY: &str = "recstudio-test-boundary";

/// Test application context: the real router over a temporary upload
/// directory.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Temporary upload directory, removed on drop.
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Create a new test application.
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.upload_dir = upload_dir.path().to_string_lossy().to_string();

        let store = LocalRecordingStore::new(&config.storage.upload_dir)
            .await
            .expect("Failed to init store");

        let state = AppState {
            config: Arc::new(config),
            store: Arc::new(store),
        };

        Self {
            router: build_router(state),
            upload_dir,
        }
    }

    /// Place a file directly into the upload directory, bypassing the API.
    pub fn seed_file(&self, name: &str, data: &[u8]) {
        std::fs::write(self.upload_dir.path().join(name), data).expect("Failed to seed file");
    }

    /// Names of all files currently in the upload directory.
    pub fn files_on_disk(&self) -> Vec<String> {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }

    /// GET a path and parse the JSON response.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// GET a path and return the raw response bytes.
    pub async fn get_raw(&self, path: &str, range: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(range) = range {
            req = req.header("Range", range);
        }
        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    /// POST a multipart upload with one file part under `field`.
    pub async fn upload(&self, field: &str, file_name: &str, data: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.post_multipart(body).await
    }

    /// POST a multipart form carrying only a text field (no file part).
    pub async fn post_text_form(&self, field: &str, value: &str) -> TestResponse {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"\r\n\r\n\
             {value}\r\n\
             --{BOUNDARY}--\r\n"
        )
        .into_bytes();

        self.post_multipart(body).await
    }

    async fn post_multipart(&self, body: Vec<u8>) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
