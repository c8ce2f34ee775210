use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::complaints::dtos::{
    AssignComplaintDto, ComplaintNotification, ComplaintResponseDto, ComplaintSubmission,
    ImageUpload, UpdateStatusDto,
};
use crate::features::complaints::models::{Complaint, ComplaintUpdate, NewComplaint};
use crate::features::complaints::repositories::ComplaintRepository;
use crate::modules::storage::BlobStore;
use crate::modules::webhook::WebhookNotifier;
use crate::shared::constants::{MAX_IMAGE_SIZE, STATUS_ASSIGNED, STATUS_SUBMITTED};
use crate::shared::validation::{
    content_type_for_image, has_allowed_image_extension, image_extension, sanitize_filename,
};

/// Service for the complaint intake and triage workflow
pub struct ComplaintService {
    repository: Arc<dyn ComplaintRepository>,
    blob_store: Arc<dyn BlobStore>,
    notifier: Arc<dyn WebhookNotifier>,
}

impl ComplaintService {
    pub fn new(
        repository: Arc<dyn ComplaintRepository>,
        blob_store: Arc<dyn BlobStore>,
        notifier: Arc<dyn WebhookNotifier>,
    ) -> Self {
        Self {
            repository,
            blob_store,
            notifier,
        }
    }

    /// Record a new complaint.
    ///
    /// Steps run strictly in order: validate, upload the image, insert the row,
    /// notify the webhook. Nothing is undone when a later step fails: an image
    /// uploaded before a failed insert stays in the bucket (its key is logged).
    pub async fn submit(&self, submission: ComplaintSubmission) -> Result<Complaint> {
        submission
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(image) = &submission.image {
            validate_image(image)?;
        }

        let ComplaintSubmission {
            title,
            description,
            complaint_type,
            student_name,
            email,
            image,
        } = submission;

        let file_url = match image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let new_complaint = NewComplaint {
            title,
            description,
            complaint_type,
            file_url: file_url.clone(),
            status: STATUS_SUBMITTED.to_string(),
            student_name,
            email,
        };

        let complaint = match self.repository.insert(new_complaint).await {
            Ok(complaint) => complaint,
            Err(e) => {
                if let Some(url) = &file_url {
                    warn!(file_url = %url, "Complaint insert failed after upload; image left orphaned");
                }
                return Err(e);
            }
        };

        self.notify_submitted(&complaint).await;

        info!(
            "Complaint submitted successfully: id={}, type={}, has_image={}",
            complaint.id,
            complaint.complaint_type,
            complaint.file_url.is_some()
        );

        Ok(complaint)
    }

    /// All complaints, most recent first
    pub async fn list(&self) -> Result<Vec<ComplaintResponseDto>> {
        let complaints = self.repository.list_recent_first().await?;
        Ok(complaints.into_iter().map(ComplaintResponseDto::from).collect())
    }

    /// Hand a complaint to `assignee` and move it to "Assigned".
    ///
    /// An unknown id is not an error; it is logged and reported as success.
    pub async fn assign(&self, dto: AssignComplaintDto) -> Result<()> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let affected = self
            .repository
            .update_by_id(
                dto.id,
                ComplaintUpdate {
                    status: STATUS_ASSIGNED.to_string(),
                    assigned_to: Some(dto.assignee.clone()),
                },
            )
            .await?;

        log_mutation("assign", dto.id, affected);
        if affected > 0 {
            info!("Complaint {} assigned to {}", dto.id, dto.assignee);
        }
        Ok(())
    }

    /// Set the status of exactly one complaint
    pub async fn update_status(&self, dto: UpdateStatusDto) -> Result<()> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let affected = self
            .repository
            .update_by_id(
                dto.id,
                ComplaintUpdate {
                    status: dto.status.clone(),
                    assigned_to: None,
                },
            )
            .await?;

        log_mutation("update_status", dto.id, affected);
        if affected > 0 {
            info!("Complaint {} moved to status {}", dto.id, dto.status);
        }
        Ok(())
    }

    async fn store_image(&self, image: ImageUpload) -> Result<String> {
        let key = storage_key(&image.filename);
        let content_type = content_type_for_image(&image.filename);

        self.blob_store.put(&key, image.data, content_type).await
    }

    /// Best-effort: delivery failures are logged and never reach the caller.
    async fn notify_submitted(&self, complaint: &Complaint) {
        let payload = match serde_json::to_value(ComplaintNotification::from(complaint)) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not build webhook payload for complaint {}: {}", complaint.id, e);
                return;
            }
        };

        if let Err(e) = self.notifier.post_json(&payload).await {
            warn!(
                complaint_id = complaint.id,
                "Webhook notification failed: {}", e
            );
        }
    }
}

fn validate_image(image: &ImageUpload) -> Result<()> {
    if !has_allowed_image_extension(&image.filename) {
        return Err(AppError::Validation("Invalid file type.".to_string()));
    }
    if image.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::Validation("File too large.".to_string()));
    }
    Ok(())
}

/// `<uuid>_<sanitized name>`, or `<uuid><ext>` when nothing usable survives sanitizing
fn storage_key(filename: &str) -> String {
    let id = Uuid::new_v4();
    let name = sanitize_filename(filename);

    if name.is_empty() || !has_allowed_image_extension(&name) {
        format!("{}{}", id, image_extension(filename).unwrap_or_default())
    } else {
        format!("{}_{}", id, name)
    }
}

fn log_mutation(operation: &str, id: i64, affected: u64) {
    if affected == 0 {
        warn!(
            operation,
            complaint_id = id,
            rows_affected = 0,
            "No complaint matched; reporting success anyway"
        );
    }
}
