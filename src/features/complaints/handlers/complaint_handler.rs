use axum::{
    extract::{multipart::Field, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::complaints::dtos::{
    AssignComplaintDto, ComplaintListResponse, ComplaintSubmission, ImageUpload,
    SubmitComplaintForm, UpdateStatusDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ActionResponse, ErrorBody};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Submit a complaint
///
/// Accepts multipart/form-data with:
/// - `title`, `description`, `type`: required
/// - `student_name`, `email`: optional
/// - `file`: optional image (png/jpg/jpeg/gif, at most 5MB)
///
/// Redirects the browser to the dashboard on success.
#[utoipa::path(
    post,
    path = "/submit",
    tag = "complaints",
    request_body(
        content = SubmitComplaintForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 302, description = "Complaint stored; redirect to /dashboard"),
        (status = 400, description = "Missing field, invalid file type or file too large", body = ActionResponse),
        (status = 500, description = "Storage or database failure", body = ActionResponse)
    )
)]
pub async fn submit_complaint(
    State(service): State<Arc<ComplaintService>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    service.submit(submission).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, DASHBOARD_PATH)]).into_response())
}

/// List all complaints, most recent first
#[utoipa::path(
    get,
    path = "/get_complaints",
    tag = "complaints",
    responses(
        (status = 200, description = "All complaints", body = ComplaintListResponse),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn get_complaints(
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ComplaintListResponse>, (StatusCode, Json<ErrorBody>)> {
    match service.list().await {
        Ok(complaints) => Ok(Json(ComplaintListResponse { complaints })),
        Err(e) => {
            error!(error = ?e, "Error fetching complaints");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Could not fetch complaints".to_string(),
                }),
            ))
        }
    }
}

/// Assign a complaint to a staff member
#[utoipa::path(
    post,
    path = "/assign_complaint",
    tag = "complaints",
    request_body = AssignComplaintDto,
    responses(
        (status = 200, description = "Complaint assigned", body = ActionResponse),
        (status = 400, description = "Malformed request", body = ActionResponse),
        (status = 500, description = "Database failure", body = ActionResponse)
    )
)]
pub async fn assign_complaint(
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<AssignComplaintDto>,
) -> Result<Json<ActionResponse>, AppError> {
    service.assign(dto).await?;

    Ok(Json(ActionResponse::success(
        "Complaint assigned successfully.",
    )))
}

/// Change the status of one complaint
#[utoipa::path(
    post,
    path = "/update_status",
    tag = "complaints",
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ActionResponse),
        (status = 400, description = "Malformed request", body = ActionResponse),
        (status = 500, description = "Database failure", body = ActionResponse)
    )
)]
pub async fn update_status(
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ActionResponse>, AppError> {
    service.update_status(dto).await?;

    Ok(Json(ActionResponse::success(
        "Complaint status updated successfully.",
    )))
}

async fn read_submission(mut multipart: Multipart) -> Result<ComplaintSubmission, AppError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut complaint_type: Option<String> = None;
    let mut student_name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "type" => complaint_type = Some(read_text(field).await?),
            "student_name" => student_name = non_empty(read_text(field).await?),
            "email" => email = non_empty(read_text(field).await?),
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();

                // Browsers send an empty part when no file was chosen
                if filename.is_empty() {
                    continue;
                }

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                image = Some(ImageUpload {
                    filename,
                    data: data.to_vec(),
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(ComplaintSubmission {
        title: required(title, "title")?,
        description: required(description, "description")?,
        complaint_type: required(complaint_type, "type")?,
        student_name,
        email,
        image,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
}
