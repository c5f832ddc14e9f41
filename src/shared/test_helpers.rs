#[cfg(test)]
use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Mutex,
};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::core::extractor::AuthenticatedOperator;
#[cfg(test)]
use crate::features::content::ContentProvider;
#[cfg(test)]
use crate::features::notifications::Mailer;
#[cfg(test)]
use crate::features::reports::models::{Report, ReportStatus};
#[cfg(test)]
use crate::features::reports::services::ReportStore;

/// In-process report store with the same ordering and filtering semantics
/// as the Postgres store
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryReportStore {
    rows: Mutex<Vec<Report>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
}

#[cfg(test)]
impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail like an unreachable database
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn status_of(&self, id: i64) -> Option<ReportStatus> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
    }
}

#[cfg(test)]
#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, post_id: i64, url: &str, user_ip: Option<&str>) -> Result<Report> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated write failure".to_string()));
        }

        let report = Report {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            post_id: Some(post_id),
            url: url.to_string(),
            user_ip: user_ip.map(String::from),
            status: ReportStatus::New,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated write failure".to_string()));
        }

        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, filter: Option<ReportStatus>) -> Result<i64> {
        let rows = self.rows.lock().unwrap();
        let total = rows
            .iter()
            .filter(|r| filter.map_or(true, |s| r.status == s))
            .count();
        Ok(total as i64)
    }

    async fn fetch(
        &self,
        filter: Option<ReportStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>> {
        let rows = self.rows.lock().unwrap();
        let mut matching: Vec<Report> = rows
            .iter()
            .filter(|r| filter.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[cfg(test)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer double that records every send, optionally failing each one
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
    fail_sends: AtomicBool,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "simulated delivery failure".to_string(),
            ));
        }
        Ok(())
    }
}

/// Content collaborator double resolving every post to a predictable
/// permalink and title
#[cfg(test)]
pub struct StubContentProvider {
    pub base: String,
}

#[cfg(test)]
impl StubContentProvider {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ContentProvider for StubContentProvider {
    async fn resolve_url(&self, post_id: i64) -> Result<String> {
        Ok(format!("{}/{}", self.base, post_id))
    }

    async fn get_title(&self, post_id: i64) -> Result<String> {
        Ok(format!("Post {}", post_id))
    }
}

#[cfg(test)]
async fn inject_operator_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(AuthenticatedOperator {
        subject: "test-operator".to_string(),
    });
    next.run(request).await
}

/// Wrap a router so every request carries an authenticated operator,
/// mirroring what the admin auth middleware does in production
#[cfg(test)]
pub fn with_operator_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_operator_middleware))
}
