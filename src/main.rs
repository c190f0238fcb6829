use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use steth_rebase_tracker::{
    CompositeReportHandler, Config, ConsoleReportHandler, EmailReportHandler,
    EtherscanBalanceSource, FileStateStore, RebaseEngine, ReportHandler, RunOutcome,
    TrackerError,
};
use steth_rebase_tracker::traits::balance_source::BalanceSource;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    // Configuration problems abort before any network or file activity, and
    // bypass the mail path: the recipient address itself may be what is
    // missing.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let mut handler = CompositeReportHandler::new();
    handler.add_handler(Arc::new(ConsoleReportHandler::new()));
    handler.add_handler(Arc::new(EmailReportHandler::new(config.email_recipient.clone())));

    match run(&config).await {
        Ok(outcome) => {
            handler.handle_success(&outcome.to_report()).await;
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {}", e);
            handler.handle_failure(&e).await;
            ExitCode::FAILURE
        }
    }
}

/// One tracking cycle: fetch, lock, diff, persist. The fetch completes
/// before the lock is taken or any state is touched, so a failed fetch
/// never mutates the store.
async fn run(config: &Config) -> Result<RunOutcome, TrackerError> {
    info!("Tracking stETH balance of {}", config.tracked_address);

    let source = EtherscanBalanceSource::new(config)?;
    let current = source.fetch_current_balance().await?;
    info!("Fetched current balance: {} base units", current);

    let store = FileStateStore::new(&config.balance_file, &config.rebase_file);
    let _lock = store.acquire_run_lock()?;

    let engine = RebaseEngine::new(store);
    engine.run(current)
}
