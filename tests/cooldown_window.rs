use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use promowatch::application::usecases::{CycleOutcome, RunCycleUseCase};
use promowatch::application::{AppError, AppResult, Notifier};
use promowatch::domain::{CooldownState, DiscountReport, KeywordSet, DEFAULT_COOLDOWN_SECONDS};
use promowatch::infrastructure::{clock::ManualClock, fake_fetcher::FakePageFetcher};

const DISCOUNT_PAGE: &str = "<html><body><h1>Big discount today</h1></body></html>";
const PLAIN_PAGE: &str = "<html><body><h1>Welcome</h1></body></html>";

#[derive(Clone, Default)]
struct CountingNotifier {
    count: Arc<Mutex<u32>>,
}

impl CountingNotifier {
    fn new() -> Self {
        Self::default()
    }
    fn sent(&self) -> u32 {
        *self.count.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, _report: &DiscountReport) -> AppResult<()> {
        *self.count.lock().unwrap() += 1;
        Ok(())
    }
}

/// Fails the first `failures` sends, then succeeds.
struct FlakyNotifier {
    failures: Mutex<u32>,
    delivered: Mutex<u32>,
}

impl FlakyNotifier {
    fn failing_once() -> Self {
        Self {
            failures: Mutex::new(1),
            delivered: Mutex::new(0),
        }
    }
    fn delivered(&self) -> u32 {
        *self.delivered.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for FlakyNotifier {
    async fn notify(&self, _report: &DiscountReport) -> AppResult<()> {
        let mut failures = self.failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(AppError::Notifier("smtp auth failed".into()));
        }
        *self.delivered.lock().unwrap() += 1;
        Ok(())
    }
}

fn cycle<'a>(
    fetcher: &'a FakePageFetcher,
    notifier: &'a dyn Notifier,
    clock: &'a ManualClock,
    keywords: &'a KeywordSet,
) -> RunCycleUseCase<'a> {
    RunCycleUseCase {
        fetcher,
        notifier,
        clock,
        keywords,
        url: "https://shop.example.com",
        cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
    }
}

#[tokio::test]
async fn second_match_within_window_is_suppressed() {
    let fetcher = FakePageFetcher::always(DISCOUNT_PAGE);
    let notifier = CountingNotifier::new();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    let first = cycle.execute(&mut state).await.unwrap();
    assert!(matches!(first, CycleOutcome::Notified { .. }));

    // 1s later the page still advertises a discount
    clock.advance(1);
    let second = cycle.execute(&mut state).await.unwrap();
    assert!(matches!(second, CycleOutcome::Suppressed { .. }));

    assert_eq!(notifier.sent(), 1);
}

#[tokio::test]
async fn matches_farther_apart_than_window_notify_twice() {
    let fetcher = FakePageFetcher::always(DISCOUNT_PAGE);
    let notifier = CountingNotifier::new();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    cycle.execute(&mut state).await.unwrap();
    clock.advance(DEFAULT_COOLDOWN_SECONDS + 1);
    let second = cycle.execute(&mut state).await.unwrap();

    assert!(matches!(second, CycleOutcome::Notified { .. }));
    assert_eq!(notifier.sent(), 2);
}

#[tokio::test]
async fn failed_send_does_not_advance_cooldown() {
    let fetcher = FakePageFetcher::always(DISCOUNT_PAGE);
    let notifier = FlakyNotifier::failing_once();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    let first = cycle.execute(&mut state).await.unwrap();
    assert!(matches!(first, CycleOutcome::NotifyFailed { .. }));
    assert_eq!(state.last_notified_at(), None);

    // next cycle retries immediately, no 24h suppression from the failure
    clock.advance(1);
    let second = cycle.execute(&mut state).await.unwrap();
    assert!(matches!(second, CycleOutcome::Notified { .. }));
    assert_eq!(notifier.delivered(), 1);
    assert_eq!(state.last_notified_at(), Some(1_000_001));
}

#[tokio::test]
async fn keyword_only_in_script_is_not_a_match() {
    let fetcher = FakePageFetcher::always("<script>sale</script><p>Welcome</p>");
    let notifier = CountingNotifier::new();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    let outcome = cycle.execute(&mut state).await.unwrap();
    assert_eq!(outcome, CycleOutcome::NoMatch);
    assert_eq!(notifier.sent(), 0);
}

#[tokio::test]
async fn plain_page_is_no_match() {
    let fetcher = FakePageFetcher::always(PLAIN_PAGE);
    let notifier = CountingNotifier::new();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    assert_eq!(cycle.execute(&mut state).await.unwrap(), CycleOutcome::NoMatch);
    assert_eq!(notifier.sent(), 0);
}

#[tokio::test]
async fn notified_outcome_carries_evidence() {
    let fetcher =
        FakePageFetcher::always("<body>Special Offer: 30% off with coupon SAVE30</body>");
    let notifier = CountingNotifier::new();
    let clock = ManualClock::at(1_000_000);
    let keywords = KeywordSet::promo();
    let cycle = cycle(&fetcher, &notifier, &clock, &keywords);
    let mut state = CooldownState::new();

    match cycle.execute(&mut state).await.unwrap() {
        CycleOutcome::Notified { keywords } => {
            assert!(keywords.contains("special offer"));
            assert!(keywords.contains("% off"));
            assert!(keywords.contains("coupon"));
        }
        other => panic!("expected Notified, got {other:?}"),
    }
}
