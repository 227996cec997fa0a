use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::{AppError, AppResult};

/// Retrieves raw article HTML. Failures surface as `AppError::NetworkError` and are never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> AppResult<String>;
}

pub struct HttpArticleFetcher {
    client: Client,
}

impl HttpArticleFetcher {
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> AppResult<String> {
        log::info!("Fetching article {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
