use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::content::{ContentProvider, MISSING_POST_TITLE};
use crate::features::notifications::Notifier;
use crate::features::reports::services::ReportStore;

/// Handles visitor-triggered report submissions.
///
/// Validation happens before any store access; the notification is dispatched
/// on a detached task so the submitter's response never waits on (or learns
/// about) delivery.
pub struct SubmissionService {
    store: Arc<dyn ReportStore>,
    content: Arc<dyn ContentProvider>,
    notifier: Arc<Notifier>,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn ReportStore>,
        content: Arc<dyn ContentProvider>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            store,
            content,
            notifier,
        }
    }

    /// Record a broken link report for the given post.
    ///
    /// Duplicate submissions for the same post are accepted as independent
    /// rows; the caller only learns success or a generic failure.
    pub async fn submit(&self, post_id: Option<i64>, caller_ip: Option<String>) -> Result<()> {
        let post_id = match post_id {
            Some(id) if id > 0 => id,
            _ => return Err(AppError::Validation("Invalid post ID.".to_string())),
        };

        let url = self.content.resolve_url(post_id).await?;

        let report = self.store.insert(post_id, &url, caller_ip.as_deref()).await?;

        // Report is committed; notification runs detached and best-effort
        let notifier = Arc::clone(&self.notifier);
        let content = Arc::clone(&self.content);
        tokio::spawn(async move {
            let title = content
                .get_title(post_id)
                .await
                .unwrap_or_else(|_| MISSING_POST_TITLE.to_string());
            notifier.notify_new_report(&report, &title).await;
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::NotificationConfig;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::{InMemoryReportStore, RecordingMailer, StubContentProvider};
    use chrono::Utc;
    use std::time::Duration;

    struct Harness {
        store: Arc<InMemoryReportStore>,
        mailer: Arc<RecordingMailer>,
        service: SubmissionService,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryReportStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let notifier = Arc::new(Notifier::new(
            NotificationConfig {
                notify_email: "ops@site.test".to_string(),
                site_name: "My Site".to_string(),
                mailer_endpoint: "http://mail.test/send".to_string(),
                queue_url: "http://site.test/admin/reports".to_string(),
            },
            mailer.clone(),
        ));
        let service = SubmissionService::new(
            store.clone(),
            Arc::new(StubContentProvider::new("https://site")),
            notifier,
        );
        Harness {
            store,
            mailer,
            service,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_single_new_report() {
        let h = harness();

        let before = Utc::now();
        h.service.submit(Some(42), None).await.unwrap();
        let after = Utc::now();

        assert_eq!(h.store.row_count(), 1);
        let rows = h.store.fetch(None, 100, 0).await.unwrap();
        assert_eq!(rows[0].post_id, Some(42));
        assert_eq!(rows[0].url, "https://site/42");
        assert_eq!(rows[0].status, ReportStatus::New);
        assert!(rows[0].created_at >= before && rows[0].created_at <= after);
    }

    #[tokio::test]
    async fn test_submit_records_caller_address() {
        let h = harness();

        h.service
            .submit(Some(5), Some("203.0.113.9".to_string()))
            .await
            .unwrap();

        let rows = h.store.fetch(None, 100, 0).await.unwrap();
        assert_eq!(rows[0].user_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_invalid_post_id_never_writes() {
        let h = harness();

        assert!(h.service.submit(None, None).await.is_err());
        assert!(h.service.submit(Some(0), None).await.is_err());
        assert!(h.service.submit(Some(-3), None).await.is_err());

        assert_eq!(h.store.row_count(), 0);
        assert_eq!(h.mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_separate_rows() {
        let h = harness();

        h.service.submit(Some(42), None).await.unwrap();
        h.service.submit(Some(42), None).await.unwrap();

        assert_eq!(h.store.row_count(), 2);
    }

    #[tokio::test]
    async fn test_persistence_failure_sends_no_notification() {
        let h = harness();
        h.store.fail_writes();

        assert!(h.service.submit(Some(42), None).await.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_notification_carries_post_and_url() {
        let h = harness();

        h.service.submit(Some(42), None).await.unwrap();

        // The notification task is detached; give it a moment to run
        tokio::time::sleep(Duration::from_millis(50)).await;

        let sent = h.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("My Site"));
        assert!(sent[0].body.contains("42"));
        assert!(sent[0].body.contains("https://site/42"));
    }

    #[tokio::test]
    async fn test_submission_succeeds_when_delivery_fails() {
        let h = harness();
        h.mailer.fail_sends();

        h.service.submit(Some(42), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        // Delivery failed but the report stayed committed
        assert_eq!(h.store.row_count(), 1);
    }
}
