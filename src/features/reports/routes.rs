use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{QueueService, SubmissionService};

/// Public submission route (anti-forgery is checked upstream)
pub fn public_routes(state: ReportState) -> Router {
    Router::new()
        .route("/api/reports", post(handlers::submit_report))
        .with_state(state)
}

/// Moderation routes; the caller applies the operator auth middleware
pub fn admin_routes(state: ReportState) -> Router {
    Router::new()
        .route("/api/admin/reports", get(handlers::list_report_queue))
        .route(
            "/api/admin/reports/{id}/status",
            post(handlers::transition_report),
        )
        .with_state(state)
}

/// All report routes on one router, without auth layers. Used by tests that
/// inject the operator identity directly.
#[allow(dead_code)]
pub fn routes(
    submission_service: Arc<SubmissionService>,
    queue_service: Arc<QueueService>,
) -> Router {
    let state = ReportState {
        submission_service,
        queue_service,
    };

    public_routes(state.clone()).merge(admin_routes(state))
}
