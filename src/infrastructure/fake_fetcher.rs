use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::{AppError, AppResult, PageFetcher};

/// Scripted fetch responses for tests: each call pops the next step.
/// The last step is repeated once the script runs out.
pub struct FakePageFetcher {
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
}

impl FakePageFetcher {
    pub fn new(steps: Vec<Result<&str, &str>>) -> Self {
        let script: VecDeque<Result<String, String>> = steps
            .into_iter()
            .map(|s| s.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            script: Mutex::new(script),
            last: Mutex::new(None),
        }
    }

    pub fn always(html: &str) -> Self {
        Self::new(vec![Ok(html)])
    }
}

#[async_trait]
impl PageFetcher for FakePageFetcher {
    async fn fetch(&self, _url: &str) -> AppResult<String> {
        let mut script = self.script.lock().expect("fake fetcher lock");
        let step = match script.pop_front() {
            Some(step) => {
                *self.last.lock().expect("fake fetcher lock") = Some(step.clone());
                step
            }
            None => self
                .last
                .lock()
                .expect("fake fetcher lock")
                .clone()
                .unwrap_or_else(|| Err("fake fetcher script empty".to_string())),
        };
        step.map_err(AppError::Fetch)
    }
}
