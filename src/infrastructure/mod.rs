pub mod clock;
pub mod email_notifier;
pub mod fake_fetcher;
pub mod http_fetcher;
