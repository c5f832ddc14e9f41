use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{Report, ReportAction, ReportStatus};
use crate::features::reports::services::QueuePage;

/// Request body for the public submission endpoint
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReportDto {
    /// Identifier of the post the broken link was seen on
    #[validate(range(min = 1, message = "Invalid post ID."))]
    pub post_id: Option<i64>,
}

/// Request body for an operator status transition
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionReportDto {
    pub action: ReportAction,
}

/// Query parameters for the moderation queue
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReportQueueQuery {
    /// Restrict the queue to one status; unset means all
    pub status: Option<ReportStatus>,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// One row of the moderation queue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportRowDto {
    pub id: i64,
    pub post_id: Option<i64>,
    pub url: String,
    pub user_ip: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportRowDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            post_id: r.post_id,
            url: r.url,
            user_ip: r.user_ip,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// One page of the moderation queue with pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportQueueDto {
    pub rows: Vec<ReportRowDto>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

impl From<QueuePage> for ReportQueueDto {
    fn from(page: QueuePage) -> Self {
        Self {
            rows: page.rows.into_iter().map(ReportRowDto::from).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
        }
    }
}
