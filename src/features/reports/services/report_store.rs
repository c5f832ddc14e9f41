use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Report, ReportStatus};

/// Durable store for broken link reports.
///
/// Every call reflects the latest committed state; there is no in-memory
/// caching layer. The trait is the seam that lets the submission and queue
/// services run against an in-process store in tests.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a new report with status `new` and the server timestamp.
    /// Duplicate reports for the same post are accepted as separate rows.
    async fn insert(&self, post_id: i64, url: &str, user_ip: Option<&str>) -> Result<Report>;

    /// Set the status of an existing report. Returns `false` when the id
    /// does not exist; absence is not an error.
    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<bool>;

    /// Total matching reports, optionally scoped to one status
    async fn count(&self, filter: Option<ReportStatus>) -> Result<i64>;

    /// Page of reports ordered most recent first (`created_at DESC`, ties
    /// broken by `id DESC` for determinism)
    async fn fetch(
        &self,
        filter: Option<ReportStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>>;
}

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, post_id: i64, url: &str, user_ip: Option<&str>) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO broken_link_reports (post_id, url, user_ip)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, url, user_ip, status, created_at
            "#,
        )
        .bind(post_id)
        .bind(url)
        .bind(user_ip)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Created report {} for post {}", report.id, post_id);

        Ok(report)
    }

    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE broken_link_reports
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: Option<ReportStatus>) -> Result<i64> {
        let total = match filter {
            Some(status) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM broken_link_reports WHERE status = $1",
                )
                .bind(status)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM broken_link_reports")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(total)
    }

    async fn fetch(
        &self,
        filter: Option<ReportStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>> {
        let rows = match filter {
            Some(status) => {
                sqlx::query_as::<_, Report>(
                    r#"
                    SELECT id, post_id, url, user_ip, status, created_at
                    FROM broken_link_reports
                    WHERE status = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Report>(
                    r#"
                    SELECT id, post_id, url, user_ip, status, created_at
                    FROM broken_link_reports
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to fetch reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows)
    }
}
