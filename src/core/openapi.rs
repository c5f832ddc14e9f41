use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::reports::dtos as reports_dtos;
use crate::features::reports::handlers::report_handler;
use crate::features::reports::models as reports_models;
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports (public submission)
        report_handler::submit_report,
        // Moderation queue (operator)
        report_handler::list_report_queue,
        report_handler::transition_report,
    ),
    components(
        schemas(
            reports_models::ReportStatus,
            reports_models::ReportAction,
            reports_dtos::SubmitReportDto,
            reports_dtos::TransitionReportDto,
            reports_dtos::ReportRowDto,
            reports_dtos::ReportQueueDto,
            ApiResponse<reports_dtos::ReportQueueDto>,
        )
    ),
    tags(
        (name = "reports", description = "Broken link report submission (public)"),
        (name = "admin", description = "Moderation queue (operator only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Linkreport API",
        version = "0.1.0",
        description = "Broken link report intake and moderation API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
