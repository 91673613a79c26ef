use std::collections::BTreeSet;

use tracing_subscriber::EnvFilter;

use promowatch::application::usecases::{delay_after, CycleOutcome, RunCycleUseCase};
use promowatch::application::{AppError, AppResult};
use promowatch::domain::{CooldownState, KeywordSet, DEFAULT_COOLDOWN_SECONDS};
use promowatch::infrastructure::{
    clock::SystemClock, email_notifier::EmailNotifier, http_fetcher::HttpPageFetcher,
};
use promowatch::interfaces::config::Config;

fn init_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all("logs")?;
    let file = tracing_appender::rolling::never("logs", "promowatch.log");
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("promowatch=info".parse()?),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let _guard = match init_logging() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("failed to set up logging: {e}");
            return;
        }
    };

    // 1) load + validate config, fail fast before any network I/O
    let cfg = Config::from_env();
    let missing = cfg.validate();
    if !missing.is_empty() {
        for line in &missing {
            println!("{line}");
        }
        return;
    }

    // 2) build infra
    let fetcher = match HttpPageFetcher::new(&cfg.user_agent) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return;
        }
    };
    let notifier = match EmailNotifier::from_config(&cfg) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "failed to build email notifier");
            return;
        }
    };
    let clock = SystemClock;
    let keywords = KeywordSet::promo();

    // 3) monitor loop — cooldown state lives here, nowhere else
    let mut state = CooldownState::new();
    let cycle = RunCycleUseCase {
        fetcher: &fetcher,
        notifier: &notifier,
        clock: &clock,
        keywords: &keywords,
        url: &cfg.website_url,
        cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
    };

    tracing::info!(
        url = %cfg.website_url,
        check_interval = cfg.check_interval,
        "discount monitor started"
    );

    loop {
        let result = cycle.execute(&mut state).await;
        log_outcome(&result);

        let delay = delay_after(&result, cfg.check_interval);
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("operator interrupt, shutting down");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

fn log_outcome(result: &AppResult<CycleOutcome>) {
    match result {
        Ok(CycleOutcome::NoMatch) => tracing::info!("no discount detected"),
        Ok(CycleOutcome::Notified { keywords }) => {
            tracing::info!(keywords = %joined(keywords), "discount detected, alert sent");
        }
        Ok(CycleOutcome::Suppressed { keywords }) => {
            tracing::info!(
                keywords = %joined(keywords),
                "discount detected, suppressed by cooldown"
            );
        }
        Ok(CycleOutcome::NotifyFailed { keywords, reason }) => {
            tracing::error!(
                keywords = %joined(keywords),
                reason = %reason,
                "discount detected but alert send failed, will retry next cycle"
            );
        }
        Err(AppError::Fetch(e)) => {
            tracing::error!(error = %e, "fetch failed, treating cycle as no match");
        }
        Err(e) => {
            tracing::error!(error = %e, "cycle fault, taking extended recovery sleep");
        }
    }
}

fn joined(keywords: &BTreeSet<String>) -> String {
    keywords.iter().cloned().collect::<Vec<_>>().join(", ")
}
