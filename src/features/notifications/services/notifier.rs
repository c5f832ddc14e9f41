use std::sync::Arc;

use crate::core::config::NotificationConfig;
use crate::features::notifications::clients::Mailer;
use crate::features::reports::models::Report;

/// Composes and dispatches the operator alert for a newly created report.
///
/// Notification is fire-and-forget: the report is already committed by the
/// time this runs, so a delivery failure is logged and swallowed, never
/// surfaced to the submitter and never retried.
pub struct Notifier {
    config: NotificationConfig,
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(config: NotificationConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self { config, mailer }
    }

    pub async fn notify_new_report(&self, report: &Report, post_title: &str) {
        let subject = format!("Broken link reported on {}", self.config.site_name);
        let body = self.compose_body(report, post_title);

        if let Err(e) = self
            .mailer
            .send(&self.config.notify_email, &subject, &body)
            .await
        {
            tracing::warn!(
                "Failed to deliver notification for report {}: {}",
                report.id,
                e
            );
        } else {
            tracing::debug!("Notification sent for report {}", report.id);
        }
    }

    fn compose_body(&self, report: &Report, post_title: &str) -> String {
        format!(
            "A broken link was reported automatically:\n\n\
             Post: {} (ID: {})\n\
             URL:  {}\n\
             IP: {}\n\
             Time: {}\n\n\
             View reports: {}",
            post_title,
            report.post_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            report.url,
            report.user_ip.as_deref().unwrap_or("N/A"),
            report.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.config.queue_url,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::RecordingMailer;
    use chrono::Utc;

    fn test_config() -> NotificationConfig {
        NotificationConfig {
            notify_email: "ops@site.test".to_string(),
            site_name: "My Site".to_string(),
            mailer_endpoint: "http://mail.test/send".to_string(),
            queue_url: "http://site.test/admin/reports".to_string(),
        }
    }

    fn test_report() -> Report {
        Report {
            id: 7,
            post_id: Some(42),
            url: "https://site/x".to_string(),
            user_ip: Some("203.0.113.9".to_string()),
            status: ReportStatus::New,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_notification_content() {
        let mailer = Arc::new(RecordingMailer::new());
        let notifier = Notifier::new(test_config(), mailer.clone());

        notifier.notify_new_report(&test_report(), "Post 42").await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ops@site.test");
        assert!(sent[0].subject.contains("My Site"));
        assert!(sent[0].body.contains("42"));
        assert!(sent[0].body.contains("https://site/x"));
        assert!(sent[0].body.contains("203.0.113.9"));
        assert!(sent[0].body.contains("http://site.test/admin/reports"));
    }

    #[tokio::test]
    async fn test_missing_reporter_address_uses_placeholder() {
        let mailer = Arc::new(RecordingMailer::new());
        let notifier = Notifier::new(test_config(), mailer.clone());

        let mut report = test_report();
        report.user_ip = None;
        notifier.notify_new_report(&report, "Post 42").await;

        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].body.contains("IP: N/A"));
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let mailer = Arc::new(RecordingMailer::new());
        mailer.fail_sends();
        let notifier = Notifier::new(test_config(), mailer.clone());

        // Must not panic or propagate anything
        notifier.notify_new_report(&test_report(), "Post 42").await;

        assert_eq!(mailer.sent_count(), 1);
    }
}
