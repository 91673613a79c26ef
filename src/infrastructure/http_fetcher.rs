use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};

use crate::application::{AppError, AppResult, PageFetcher};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// One GET per call with a User-Agent header and a Referer pointing at the
/// target itself. Every network-layer failure maps to `AppError::Fetch`.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| AppError::Fetch(e.to_string()))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(url).map_err(|e| AppError::Fetch(e.to_string()))?,
        );

        let resp = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        resp.text()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }
}
