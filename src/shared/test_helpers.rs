//! In-memory stand-ins for the external collaborators, used by router tests.

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{Complaint, ComplaintUpdate, NewComplaint};
use crate::features::complaints::{self, ComplaintRepository, ComplaintService};
use crate::features::pages;
use crate::modules::storage::BlobStore;
use crate::modules::webhook::WebhookNotifier;
use crate::shared::views::TemplateRenderer;

pub const TEST_BLOB_BASE_URL: &str = "http://blobs.test/complaint-images";

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
}

#[derive(Default)]
pub struct InMemoryComplaintRepository {
    rows: Mutex<Vec<Complaint>>,
    failing: AtomicBool,
}

impl InMemoryComplaintRepository {
    /// Simulate a database outage for every subsequent call
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Complaint> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, id: i64) -> Option<Complaint> {
        self.rows().into_iter().find(|c| c.id == id)
    }

    /// Insert a row as-is, bypassing the service
    pub fn seed(&self, complaint: Complaint) {
        self.rows.lock().unwrap().push(complaint);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: NewComplaint) -> Result<Complaint> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let row = Complaint {
            id,
            title: complaint.title,
            description: complaint.description,
            complaint_type: complaint.complaint_type,
            file_url: complaint.file_url,
            status: complaint.status,
            assigned_to: None,
            student_name: complaint.student_name,
            email: complaint.email,
            submitted_at: Some(base_time() + Duration::minutes(id)),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_recent_first(&self) -> Result<Vec<Complaint>> {
        self.check()?;
        let mut rows = self.rows();
        // Mirrors ORDER BY submitted_at DESC NULLS LAST, id DESC
        rows.sort_by(|a, b| match (a.submitted_at, b.submitted_at) {
            (Some(x), Some(y)) => y.cmp(&x).then(b.id.cmp(&a.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.id.cmp(&a.id),
        });
        Ok(rows)
    }

    async fn update_by_id(&self, id: i64, update: ComplaintUpdate) -> Result<u64> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows.iter_mut().filter(|c| c.id == id) {
            row.status = update.status.clone();
            if let Some(assignee) = &update.assigned_to {
                row.assigned_to = Some(assignee.clone());
            }
            affected += 1;
        }
        Ok(affected)
    }
}

#[derive(Default)]
pub struct InMemoryBlobStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    failing: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, content_type)| content_type.clone())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn ensure_container_exists(&self) -> Result<()> {
        Ok(())
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Storage("connection refused".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(format!("{}/{}", TEST_BLOB_BASE_URL, key))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    payloads: Mutex<Vec<Value>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookNotifier for RecordingNotifier {
    async fn post_json(&self, payload: &Value) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "Webhook responded with 502 Bad Gateway".to_string(),
            ));
        }
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// The full application router wired to in-memory collaborators
pub struct TestApp {
    pub repository: Arc<InMemoryComplaintRepository>,
    pub blob_store: Arc<InMemoryBlobStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryComplaintRepository::default()),
            blob_store: Arc::new(InMemoryBlobStore::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn service(&self) -> Arc<ComplaintService> {
        Arc::new(ComplaintService::new(
            self.repository.clone(),
            self.blob_store.clone(),
            self.notifier.clone(),
        ))
    }

    pub fn router(&self) -> Router {
        let renderer = Arc::new(TemplateRenderer::new().unwrap());
        Router::new()
            .merge(complaints::routes(self.service()))
            .merge(pages::routes(renderer))
    }
}

/// A stored complaint with only the interesting fields filled in
pub fn complaint(id: i64, submitted_at: Option<DateTime<Utc>>) -> Complaint {
    Complaint {
        id,
        title: format!("Complaint {}", id),
        description: "Seeded".to_string(),
        complaint_type: "Other".to_string(),
        file_url: None,
        status: "Submitted".to_string(),
        assigned_to: None,
        student_name: None,
        email: None,
        submitted_at,
    }
}
