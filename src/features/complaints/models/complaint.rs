use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for complaints
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub complaint_type: String,
    pub file_url: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Row to insert; `id` and `submitted_at` come from the database
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub complaint_type: String,
    pub file_url: Option<String>,
    pub status: String,
    pub student_name: Option<String>,
    pub email: Option<String>,
}

/// Single-row mutation applied by id.
///
/// `assigned_to: None` leaves the current assignee as it is.
#[derive(Debug, Clone)]
pub struct ComplaintUpdate {
    pub status: String,
    pub assigned_to: Option<String>,
}
