use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::ContentConfig;
use crate::core::error::{AppError, Result};

/// Title shown when the reported post no longer exists
pub const MISSING_POST_TITLE: &str = "(no post)";

/// Content collaborator: permalink and title lookups by post id.
///
/// The content system is external; reports keep only a weak post_id
/// reference, so a lookup may legitimately find nothing.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Canonical permalink of the post at the time of the call
    async fn resolve_url(&self, post_id: i64) -> Result<String>;

    /// Post title, or a placeholder if the post no longer exists
    async fn get_title(&self, post_id: i64) -> Result<String>;
}

/// Post summary returned by the site content API
#[derive(Debug, Deserialize)]
struct PostSummary {
    url: String,
    title: String,
}

/// HTTP client for the site content API
pub struct SiteContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl SiteContentClient {
    pub fn new(config: ContentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<PostSummary>> {
        let url = format!("{}/api/posts/{}", self.base_url, post_id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Content API request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Content API unreachable: {}", e))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Content API returned {}",
                response.status()
            )));
        }

        let summary = response.json::<PostSummary>().await.map_err(|e| {
            tracing::error!("Failed to parse content API response: {:?}", e);
            AppError::ExternalServiceError(format!("Invalid content API response: {}", e))
        })?;

        Ok(Some(summary))
    }
}

#[async_trait]
impl ContentProvider for SiteContentClient {
    async fn resolve_url(&self, post_id: i64) -> Result<String> {
        self.get_post(post_id)
            .await?
            .map(|p| p.url)
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))
    }

    async fn get_title(&self, post_id: i64) -> Result<String> {
        Ok(self
            .get_post(post_id)
            .await?
            .map(|p| p.title)
            .unwrap_or_else(|| MISSING_POST_TITLE.to_string()))
    }
}
