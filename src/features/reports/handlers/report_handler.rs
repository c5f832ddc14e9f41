use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AuthenticatedOperator, CallerContext};
use crate::features::reports::dtos::{
    ReportQueueDto, ReportQueueQuery, SubmitReportDto, TransitionReportDto,
};
use crate::features::reports::services::{QueueService, SubmissionService};
use crate::shared::types::ApiResponse;
use validator::Validate;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub submission_service: Arc<SubmissionService>,
    pub queue_service: Arc<QueueService>,
}

/// Submit a broken link report for a post
///
/// Public endpoint: the anti-forgery check happens upstream. The submitter
/// only learns success or a generic failure.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SubmitReportDto,
    responses(
        (status = 200, description = "Report recorded"),
        (status = 400, description = "Invalid post ID")
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    caller: CallerContext,
    AppJson(dto): AppJson<SubmitReportDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|_| AppError::Validation("Invalid post ID.".to_string()))?;

    state.submission_service.submit(dto.post_id, caller.ip).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Thanks, your report has been sent!".to_string()),
    )))
}

/// List the moderation queue
///
/// Fixed page size of 100, most recent first.
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(ReportQueueQuery),
    responses(
        (status = 200, description = "One page of the queue", body = ApiResponse<ReportQueueDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_report_queue(
    _operator: AuthenticatedOperator,
    State(state): State<ReportState>,
    Query(query): Query<ReportQueueQuery>,
) -> Result<Json<ApiResponse<ReportQueueDto>>> {
    let page = state.queue_service.list(query.status, query.page).await?;

    let message = (page.total_count == 0).then(|| "No reports yet.".to_string());

    Ok(Json(ApiResponse::success(
        Some(ReportQueueDto::from(page)),
        message,
    )))
}

/// Apply an operator action (resolve, ignore, reopen) to a report
///
/// A transition on a missing report id is a silent no-op.
#[utoipa::path(
    post,
    path = "/api/admin/reports/{id}/status",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = TransitionReportDto,
    responses(
        (status = 200, description = "Status updated"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn transition_report(
    operator: AuthenticatedOperator,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<TransitionReportDto>,
) -> Result<Json<ApiResponse<()>>> {
    tracing::info!(
        "Operator {} applied {:?} to report {}",
        operator.subject,
        dto.action,
        id
    );

    state.queue_service.transition(id, dto.action).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Status updated.".to_string()),
    )))
}
