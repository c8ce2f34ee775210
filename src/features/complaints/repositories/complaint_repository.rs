use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::complaints::models::{Complaint, ComplaintUpdate, NewComplaint};

const COMPLAINT_COLUMNS: &str = "id, title, description, type, file_url, status, assigned_to, \
                                 student_name, email, submitted_at";

const INSERT_SQL: &str = r#"
    INSERT INTO complaints (title, description, type, file_url, status, student_name, email)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, title, description, type, file_url, status, assigned_to, student_name, email, submitted_at
"#;

/// Status and id are bound separately; the WHERE clause keeps the update to a single row.
const UPDATE_BY_ID_SQL: &str = r#"
    UPDATE complaints
    SET status = $1, assigned_to = COALESCE($2, assigned_to)
    WHERE id = $3
"#;

/// Relational store for complaints
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn insert(&self, complaint: NewComplaint) -> Result<Complaint>;

    /// All complaints, newest `submitted_at` first; rows without a timestamp last
    async fn list_recent_first(&self) -> Result<Vec<Complaint>>;

    /// Apply `update` to the row with `id`, returning the number of rows touched
    async fn update_by_id(&self, id: i64, update: ComplaintUpdate) -> Result<u64>;
}

pub struct PgComplaintRepository {
    pool: PgPool,
}

impl PgComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    async fn insert(&self, complaint: NewComplaint) -> Result<Complaint> {
        let row = sqlx::query_as::<_, Complaint>(INSERT_SQL)
            .bind(complaint.title)
            .bind(complaint.description)
            .bind(complaint.complaint_type)
            .bind(complaint.file_url)
            .bind(complaint.status)
            .bind(complaint.student_name)
            .bind(complaint.email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list_recent_first(&self) -> Result<Vec<Complaint>> {
        let sql = format!(
            "SELECT {} FROM complaints ORDER BY submitted_at DESC NULLS LAST, id DESC",
            COMPLAINT_COLUMNS
        );

        let rows = sqlx::query_as::<_, Complaint>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn update_by_id(&self, id: i64, update: ComplaintUpdate) -> Result<u64> {
        let result = sqlx::query(UPDATE_BY_ID_SQL)
            .bind(update.status)
            .bind(update.assigned_to)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
