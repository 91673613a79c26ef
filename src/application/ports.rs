use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::domain::DiscountReport;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("notifier error: {0}")]
    Notifier(String),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Fetch the raw HTML of one page. One GET, fixed timeout, no retries —
/// retry policy lives at the loop level.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<String>;
}

/// Deliver one alert. Failure is reported, never raised past the cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, report: &DiscountReport) -> AppResult<()>;
}

/// Wall clock as a port so cooldown transitions are testable without
/// real time passing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}
