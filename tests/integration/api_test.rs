//! Integration tests for the upload/list/serve lifecycle.

mod helpers;

use http::StatusCode;

/// `filename` must look like `recording_<13-digit-millis><ext>`.
fn assert_timestamped_name(filename: &str, ext: &str) {
    assert!(
        filename.starts_with("recording_") && filename.ends_with(ext),
        "unexpected filename: {filename}"
    );
    let millis = &filename["recording_".len()..filename.len() - ext.len()];
    assert_eq!(millis.len(), 13, "unexpected filename: {filename}");
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn upload_then_list_then_download_roundtrip() {
    let app = helpers::TestApp::new().await;
    app.seed_file("recording_1000.webm", b"old");

    let response = app
        .upload("recording", "recording_session-1.webm", b"0123456789")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "File uploaded successfully"
    );

    let filename = response
        .body
        .get("filename")
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();
    assert_timestamped_name(&filename, ".webm");
    assert_eq!(
        response.body.get("path").unwrap().as_str().unwrap(),
        format!("/uploads/{filename}")
    );

    // Exactly one new entry, listed first (newest).
    let listing = app.get("/api/recordings").await;
    assert_eq!(listing.status, StatusCode::OK);
    let entries = listing.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].get("filename").unwrap().as_str().unwrap(),
        filename
    );
    assert_eq!(
        entries[0].get("url").unwrap().as_str().unwrap(),
        format!("/uploads/{filename}")
    );
    assert!(entries[0].get("date").unwrap().is_string());

    // The served bytes are identical to what was uploaded.
    let (status, bytes) = app.get_raw(&format!("/uploads/{filename}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"0123456789");
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.post_text_form("notes", "not a file").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        "No file uploaded"
    );

    // Nothing was written to disk.
    assert!(app.files_on_disk().is_empty());
}

#[tokio::test]
async fn upload_keeps_client_extension_verbatim() {
    let app = helpers::TestApp::new().await;

    let response = app.upload("recording", "clip.MP4", b"x").await;
    assert_eq!(response.status, StatusCode::OK);

    let filename = response.body.get("filename").unwrap().as_str().unwrap();
    assert_timestamped_name(filename, ".MP4");

    // The case-insensitive filter still lists it.
    let listing = app.get("/api/recordings").await;
    assert_eq!(listing.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listing_hides_non_media_files() {
    let app = helpers::TestApp::new().await;
    app.seed_file("recording_1000.webm", b"a");
    app.seed_file("notes.txt", b"b");

    let listing = app.get("/api/recordings").await;
    assert_eq!(listing.status, StatusCode::OK);
    let entries = listing.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].get("filename").unwrap().as_str().unwrap(),
        "recording_1000.webm"
    );
}

#[tokio::test]
async fn listing_sorts_by_embedded_timestamp_descending() {
    let app = helpers::TestApp::new().await;
    app.seed_file("recording_1000.webm", b"a");
    app.seed_file("recording_3000.mp4", b"b");
    app.seed_file("recording_2000.ogg", b"c");

    let listing = app.get("/api/recordings").await;
    let names: Vec<&str> = listing
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.get("filename").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "recording_3000.mp4",
            "recording_2000.ogg",
            "recording_1000.webm"
        ]
    );
}

#[tokio::test]
async fn empty_directory_lists_as_empty() {
    let app = helpers::TestApp::new().await;

    let listing = app.get("/api/recordings").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert!(listing.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_is_idempotent_for_filenames() {
    let app = helpers::TestApp::new().await;
    app.seed_file("recording_1000.webm", b"a");
    // Malformed name: its date is derived at request time, but the
    // filename set must not change between calls.
    app.seed_file("clip.webm", b"b");

    let names = |listing: &serde_json::Value| -> Vec<String> {
        listing
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.get("filename").unwrap().as_str().unwrap().to_string())
            .collect()
    };

    let first = app.get("/api/recordings").await;
    let second = app.get("/api/recordings").await;

    let mut a = names(&first.body);
    let mut b = names(&second.body);
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[tokio::test]
async fn malformed_filename_keeps_its_own_identity() {
    let app = helpers::TestApp::new().await;
    app.seed_file("clip.webm", b"a");

    let listing = app.get("/api/recordings").await;
    let entries = listing.body.as_array().unwrap();
    assert_eq!(entries[0].get("id").unwrap().as_str().unwrap(), "clip.webm");
    assert_eq!(
        entries[0].get("url").unwrap().as_str().unwrap(),
        "/uploads/clip.webm"
    );
}

#[tokio::test]
async fn uploaded_files_support_byte_ranges() {
    let app = helpers::TestApp::new().await;

    let response = app.upload("recording", "r.webm", b"0123456789").await;
    let filename = response.body.get("filename").unwrap().as_str().unwrap();

    let (status, bytes) = app
        .get_raw(&format!("/uploads/{filename}"), Some("bytes=0-3"))
        .await;
    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(bytes, b"0123");
}

#[tokio::test]
async fn health_reports_storage_ready() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("status").unwrap().as_str().unwrap(), "ok");
    assert_eq!(
        response.body.get("storage").unwrap().as_str().unwrap(),
        "available"
    );
}
