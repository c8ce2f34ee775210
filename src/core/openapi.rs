use utoipa::{Modify, OpenApi};

use crate::core::config::SwaggerConfig;
use crate::features::complaints::{dtos as complaints_dtos, handlers as complaints_handlers};
use crate::shared::types::{ActionResponse, ErrorBody};

#[derive(OpenApi)]
#[openapi(
    paths(
        complaints_handlers::submit_complaint,
        complaints_handlers::get_complaints,
        complaints_handlers::assign_complaint,
        complaints_handlers::update_status,
    ),
    components(schemas(
        ActionResponse,
        ErrorBody,
        complaints_dtos::SubmitComplaintForm,
        complaints_dtos::ComplaintResponseDto,
        complaints_dtos::ComplaintListResponse,
        complaints_dtos::AssignComplaintDto,
        complaints_dtos::UpdateStatusDto,
    )),
    tags(
        (name = "complaints", description = "Complaint intake and triage")
    )
)]
pub struct ApiDoc;

/// Applies the deployment-specific title, version and description
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl From<&SwaggerConfig> for SwaggerInfoModifier {
    fn from(config: &SwaggerConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// The OpenAPI document served at `/api-docs/openapi.json`
pub fn build(config: &SwaggerConfig) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier::from(config).modify(&mut openapi);
    openapi
}
