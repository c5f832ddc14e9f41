use async_trait::async_trait;
use serde::Serialize;

use crate::core::error::{AppError, Result};

/// Outbound mail collaborator. Delivery is best-effort: callers decide
/// whether a failure matters.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Mailer backed by the platform's HTTP mail relay
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&MailRequest { to, subject, body })
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Mail relay unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Mail relay returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
