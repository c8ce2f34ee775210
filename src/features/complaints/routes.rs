use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;
use crate::shared::constants::{MAX_IMAGE_SIZE, MULTIPART_OVERHEAD};

/// Create routes for the complaints feature
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route(
            "/submit",
            // Room for one image one byte over the limit, so oversize files get a 400 and not a 413
            post(handlers::submit_complaint)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/get_complaints", get(handlers::get_complaints))
        .route("/assign_complaint", post(handlers::assign_complaint))
        .route("/update_status", post(handlers::update_status))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use chrono::{TimeZone, Utc};
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;
    use serde_json::{json, Value};

    use crate::shared::constants::MAX_IMAGE_SIZE;
    use crate::shared::test_helpers::{complaint, TestApp, TEST_BLOB_BASE_URL};

    fn server(app: &TestApp) -> TestServer {
        TestServer::new(app.router()).unwrap()
    }

    fn form() -> MultipartForm {
        let title: String = Sentence(2..5).fake();
        let description: String = Paragraph(1..3).fake();
        MultipartForm::new()
            .add_text("title", title)
            .add_text("description", description)
            .add_text("type", "Infrastructure")
    }

    fn image(name: &str, len: usize) -> Part {
        Part::bytes(vec![0x89u8; len])
            .file_name(name)
            .mime_type("image/png")
    }

    #[tokio::test]
    async fn test_submit_with_png_stores_complaint_and_redirects() {
        let app = TestApp::new();
        let server = server(&app);

        let response = server
            .post("/submit")
            .multipart(
                form()
                    .add_text("student_name", "Asha")
                    .add_text("email", "asha@example.edu")
                    .add_part("file", image("broken tap.png", 1024)),
            )
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "/dashboard");

        let rows = app.repository.rows();
        assert_eq!(rows.len(), 1);
        let stored = &rows[0];
        assert_eq!(stored.status, "Submitted");
        assert_eq!(stored.student_name.as_deref(), Some("Asha"));
        let file_url = stored.file_url.as_deref().unwrap();
        assert!(file_url.starts_with(TEST_BLOB_BASE_URL));
        assert!(file_url.ends_with("_broken_tap.png"));

        let keys = app.blob_store.keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(
            app.blob_store.content_type(&keys[0]).as_deref(),
            Some("image/png")
        );

        let payloads = app.notifier.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["status"], "Submitted");
        assert_eq!(payloads[0]["type"], "Infrastructure");
        assert_eq!(payloads[0]["file_url"], file_url);
        assert_eq!(payloads[0]["email"], "asha@example.edu");
    }

    #[tokio::test]
    async fn test_submit_without_file() {
        let app = TestApp::new();
        let response = server(&app).post("/submit").multipart(form()).await;

        response.assert_status(StatusCode::FOUND);
        let rows = app.repository.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].file_url.is_none());
        assert!(rows[0].student_name.is_none());
        assert!(app.blob_store.keys().is_empty());
        assert_eq!(app.notifier.payloads()[0]["file_url"], Value::Null);
    }

    #[tokio::test]
    async fn test_empty_file_part_counts_as_no_file() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", Part::bytes(Vec::<u8>::new()).file_name("")))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert!(app.repository.rows()[0].file_url.is_none());
    }

    #[tokio::test]
    async fn test_submit_rejects_exe_regardless_of_content() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", image("evil.exe", 16)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"success": false, "error": "Invalid file type."}));
        assert!(app.repository.rows().is_empty());
        assert!(app.blob_store.keys().is_empty());
        assert!(app.notifier.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_file_one_byte_over_limit() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", image("big.JPG", MAX_IMAGE_SIZE + 1)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"success": false, "error": "File too large."}));
        assert!(app.blob_store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_submit_accepts_file_at_exact_limit() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", image("exact.gif", MAX_IMAGE_SIZE)))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(app.blob_store.keys().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_requires_title() {
        let app = TestApp::new();
        let form = MultipartForm::new()
            .add_text("description", "No title given")
            .add_text("type", "Other");
        let response = server(&app).post("/submit").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "title is required");
        assert!(app.repository.rows().is_empty());
    }

    #[tokio::test]
    async fn test_storage_outage_returns_500_and_keeps_state() {
        let app = TestApp::new();
        app.repository.seed(complaint(1, Some(Utc::now())));
        app.blob_store.set_failing(true);

        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", image("photo.png", 64)))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
        assert_eq!(app.repository.rows().len(), 1);
        assert!(app.notifier.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_database_outage_returns_500_and_leaves_blob() {
        let app = TestApp::new();
        app.repository.set_failing(true);

        let response = server(&app)
            .post("/submit")
            .multipart(form().add_part("file", image("photo.png", 64)))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
        // No compensation: the uploaded image stays behind
        assert_eq!(app.blob_store.keys().len(), 1);
        assert!(app.notifier.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_failure_does_not_fail_submission() {
        let app = TestApp::new();
        app.notifier.set_failing(true);

        let response = server(&app).post("/submit").multipart(form()).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(app.repository.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_get_complaints_orders_newest_first_and_renders_missing_timestamp() {
        let app = TestApp::new();
        app.repository.seed(complaint(
            1,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()),
        ));
        app.repository.seed(complaint(2, None));
        app.repository.seed(complaint(
            3,
            Some(Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 15).unwrap()),
        ));
        app.repository.seed(complaint(
            4,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()),
        ));

        let response = server(&app).get("/get_complaints").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let complaints = body["complaints"].as_array().unwrap();
        let ids: Vec<i64> = complaints.iter().map(|c| c["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);

        let stamps: Vec<&str> = complaints
            .iter()
            .map(|c| c["submitted_at"].as_str().unwrap())
            .collect();
        assert_eq!(
            stamps,
            vec![
                "2025-02-01 09:30:15",
                "2025-01-15 00:00:00",
                "2025-01-01 09:00:00",
                "N/A"
            ]
        );
        // lexicographic order matches chronological order for this format
        let dated = &stamps[..3];
        assert!(dated.windows(2).all(|w| w[0] >= w[1]));

        let first = &complaints[0];
        for key in ["title", "description", "type", "file_url", "status"] {
            assert!(first.get(key).is_some(), "missing key {}", key);
        }
    }

    #[tokio::test]
    async fn test_get_complaints_database_failure() {
        let app = TestApp::new();
        app.repository.set_failing(true);

        let response = server(&app).get("/get_complaints").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"error": "Could not fetch complaints"}));
    }

    #[tokio::test]
    async fn test_assign_sets_status_and_assignee_only() {
        let app = TestApp::new();
        let before = complaint(5, Some(Utc::now()));
        app.repository.seed(before.clone());

        let response = server(&app)
            .post("/assign_complaint")
            .json(&json!({"id": 5, "assignee": "maintenance-team"}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "message": "Complaint assigned successfully."
        }));

        let after = app.repository.get(5).unwrap();
        assert_eq!(after.status, "Assigned");
        assert_eq!(after.assigned_to.as_deref(), Some("maintenance-team"));
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.complaint_type, before.complaint_type);
        assert_eq!(after.file_url, before.file_url);
        assert_eq!(after.submitted_at, before.submitted_at);
    }

    #[tokio::test]
    async fn test_assign_unknown_id_still_reports_success() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/assign_complaint")
            .json(&json!({"id": 404, "assignee": "nobody"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_assign_rejects_malformed_body() {
        let app = TestApp::new();
        let response = server(&app)
            .post("/assign_complaint")
            .json(&json!({"assignee": "no id"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_status_changes_only_target_row() {
        let app = TestApp::new();
        for id in 1..=3 {
            app.repository.seed(complaint(id, Some(Utc::now())));
        }

        let response = server(&app)
            .post("/update_status")
            .json(&json!({"id": 2, "status": "Resolved"}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "message": "Complaint status updated successfully."
        }));

        assert_eq!(app.repository.get(1).unwrap().status, "Submitted");
        assert_eq!(app.repository.get(2).unwrap().status, "Resolved");
        assert_eq!(app.repository.get(3).unwrap().status, "Submitted");
    }

    #[tokio::test]
    async fn test_update_status_keeps_assignee() {
        let app = TestApp::new();
        app.repository.seed(complaint(1, Some(Utc::now())));
        let server = server(&app);

        server
            .post("/assign_complaint")
            .json(&json!({"id": 1, "assignee": "warden"}))
            .await
            .assert_status_ok();
        server
            .post("/update_status")
            .json(&json!({"id": 1, "status": "In Progress"}))
            .await
            .assert_status_ok();

        let row = app.repository.get(1).unwrap();
        assert_eq!(row.status, "In Progress");
        assert_eq!(row.assigned_to.as_deref(), Some("warden"));
    }

    #[tokio::test]
    async fn test_update_status_database_failure() {
        let app = TestApp::new();
        app.repository.set_failing(true);

        let response = server(&app)
            .post("/update_status")
            .json(&json!({"id": 1, "status": "Closed"}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Database error"));
    }
}
