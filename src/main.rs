//! Circulation engine - fines report runner
//!
//! Loads the borrow history, logs activity statistics and exports the
//! fines report for the reference date.

use std::process::ExitCode;

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulation_engine::{
    config::{report_date_from_env, AppConfig},
    repository::Repository,
    services::Services,
    AppResult,
};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("circulation_engine={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting circulation engine v{}", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("Report run failed: {}", e);
            Ok(ExitCode::from(e.code() as u8))
        }
    }
}

fn run(config: &AppConfig) -> AppResult<()> {
    let as_of = report_date_from_env()?;
    let repository = Repository::from_config(&config.data);
    let records = repository.records.load_all()?;
    let services = Services::new(&records, &config.reports);

    tracing::info!("Reporting on {} loans as of {}", services.activity.len(), as_of);

    for (user, count) in services.activity.ranked_borrowers().into_iter().take(10) {
        tracing::info!("Borrower {} ({}): {} loans", user.name, user.id, count);
    }
    for (label, count) in services.activity.most_borrowed_items() {
        tracing::debug!("Item {}: {} loans", label, count);
    }

    let totals = services.fines.total_fines_for_all_users(as_of);
    let outstanding = totals
        .values()
        .fold(Decimal::ZERO, |acc, fine| acc.saturating_add(*fine));
    tracing::info!("Outstanding fines: {} across {} users", outstanding, totals.len());

    let path = services.exporter.export_fines_report_to_csv(as_of)?;
    tracing::info!("Fines report available at {}", path.display());

    Ok(())
}
