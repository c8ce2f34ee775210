use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::complaints::models::Complaint;

/// Rendering of a missing `submitted_at`
pub const MISSING_TIMESTAMP: &str = "N/A";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Submission form for OpenAPI documentation.
/// Note: The actual handler reads the multipart stream field by field.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct SubmitComplaintForm {
    #[schema(example = "Broken projector in room 204")]
    pub title: String,
    #[schema(example = "The projector has not turned on since Monday.")]
    pub description: String,
    /// Free-form category
    #[serde(rename = "type")]
    #[schema(example = "Infrastructure")]
    pub complaint_type: String,
    pub student_name: Option<String>,
    pub email: Option<String>,
    /// Optional image: png, jpg, jpeg or gif, at most 5MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
}

/// Image attached to a submission
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed submission form
#[derive(Debug, Clone, Validate)]
pub struct ComplaintSubmission {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "type is required"))]
    pub complaint_type: String,
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Complaint as listed on the dashboards
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub complaint_type: String,
    pub file_url: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC) or `N/A`
    #[schema(example = "2025-03-01 12:00:00")]
    pub submitted_at: String,
}

impl From<Complaint> for ComplaintResponseDto {
    fn from(complaint: Complaint) -> Self {
        Self {
            id: complaint.id,
            title: complaint.title,
            description: complaint.description,
            complaint_type: complaint.complaint_type,
            file_url: complaint.file_url,
            status: complaint.status,
            assigned_to: complaint.assigned_to,
            submitted_at: complaint
                .submitted_at
                .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| MISSING_TIMESTAMP.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintListResponse {
    pub complaints: Vec<ComplaintResponseDto>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignComplaintDto {
    pub id: i64,
    #[validate(length(min = 1, message = "assignee is required"))]
    #[schema(example = "maintenance-team")]
    pub assignee: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusDto {
    pub id: i64,
    #[validate(length(min = 1, message = "status is required"))]
    #[schema(example = "Resolved")]
    pub status: String,
}

/// Payload posted to the notification webhook for every new complaint
#[derive(Debug, Serialize)]
pub struct ComplaintNotification<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(rename = "type")]
    pub complaint_type: &'a str,
    pub file_url: Option<&'a str>,
    pub status: &'a str,
    pub student_name: Option<&'a str>,
    pub email: Option<&'a str>,
}

impl<'a> From<&'a Complaint> for ComplaintNotification<'a> {
    fn from(complaint: &'a Complaint) -> Self {
        Self {
            title: &complaint.title,
            description: &complaint.description,
            complaint_type: &complaint.complaint_type,
            file_url: complaint.file_url.as_deref(),
            status: &complaint.status,
            student_name: complaint.student_name.as_deref(),
            email: complaint.email.as_deref(),
        }
    }
}
