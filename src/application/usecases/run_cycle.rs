use std::collections::BTreeSet;
use std::time::Duration;

use crate::application::{AppError, AppResult, Clock, Notifier, PageFetcher};
use crate::domain::{extract_text, CooldownState, DiscountReport, KeywordSet};

/// Extended sleep after an unexpected cycle fault, so a persistent problem
/// does not spin the loop at the normal poll cadence.
pub const RECOVERY_DELAY_SECONDS: u64 = 300;

/// What one fetch→extract→detect→(notify) pass concluded.
///
/// Suppressed and NotifyFailed are deliberately distinct: one is the
/// cooldown working as intended, the other must be retried next cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    NoMatch,
    Notified { keywords: BTreeSet<String> },
    Suppressed { keywords: BTreeSet<String> },
    NotifyFailed { keywords: BTreeSet<String>, reason: String },
}

pub struct RunCycleUseCase<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub notifier: &'a dyn Notifier,
    pub clock: &'a dyn Clock,
    pub keywords: &'a KeywordSet,
    pub url: &'a str,
    pub cooldown_seconds: i64,
}

impl<'a> RunCycleUseCase<'a> {
    /// One cycle. A fetch failure short-circuits the remaining stages and
    /// surfaces as `Err`; the loop treats it as "no match" for this cycle.
    /// Cooldown state is advanced only on a successful send.
    pub async fn execute(&self, state: &mut CooldownState) -> AppResult<CycleOutcome> {
        let html = self.fetcher.fetch(self.url).await?;
        let text = extract_text(&html);

        let keywords = self.keywords.matches(&text);
        if keywords.is_empty() {
            return Ok(CycleOutcome::NoMatch);
        }

        let now = self.clock.now();
        if !state.ready(now.timestamp(), self.cooldown_seconds) {
            return Ok(CycleOutcome::Suppressed { keywords });
        }

        let report = DiscountReport {
            url: self.url.to_string(),
            matched_keywords: keywords.clone(),
            detected_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        match self.notifier.notify(&report).await {
            Ok(()) => {
                state.record(now.timestamp());
                Ok(CycleOutcome::Notified { keywords })
            }
            // 发送失败不推进冷却时间，下个周期重试
            Err(e) => Ok(CycleOutcome::NotifyFailed {
                keywords,
                reason: e.to_string(),
            }),
        }
    }
}

/// Sleep policy between cycles. Fetch failures are an expected per-cycle
/// outcome and keep the normal cadence; any other error is a loop fault
/// and gets the extended recovery delay.
pub fn delay_after(result: &AppResult<CycleOutcome>, check_interval_seconds: u64) -> Duration {
    match result {
        Ok(_) | Err(AppError::Fetch(_)) => Duration::from_secs(check_interval_seconds),
        Err(_) => Duration::from_secs(RECOVERY_DELAY_SECONDS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_interval_after_any_outcome() {
        assert_eq!(
            delay_after(&Ok(CycleOutcome::NoMatch), 1800),
            Duration::from_secs(1800)
        );
        assert_eq!(
            delay_after(&Err(AppError::Fetch("timeout".into())), 1800),
            Duration::from_secs(1800)
        );
    }

    #[test]
    fn recovery_delay_after_loop_fault() {
        assert_eq!(
            delay_after(&Err(AppError::Config("bad".into())), 1800),
            Duration::from_secs(RECOVERY_DELAY_SECONDS)
        );
    }
}
