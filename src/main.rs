use bizledger::{
    config::{self, account::resolve_account_id, database},
    core::{report::format_summary_line, summary::year_overview},
    errors::{Error, Result},
    state::AppState,
};
use chrono::Datelike;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings and pick the account
    let settings = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let account_id = resolve_account_id(&settings);
    info!("Using account {}", account_id);

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Load the account, seeding shareholders on first run
    let recent = settings
        .predictions
        .as_ref()
        .map_or(bizledger::core::predictions::DEFAULT_RECENT_TRANSACTIONS, |p| {
            p.recent_transactions
        });
    let mut state = AppState::new(&db, account_id).with_recent_transactions(recent);
    if let Err(e) = state.seed_shareholders(&settings.shareholders).await {
        warn!("Shareholder seeding skipped: {}", e);
    }
    // Failures are logged per kind and kept as notices
    let _ = state.load_all().await;

    // 6. Report
    let today = chrono::Local::now().date_naive();
    let summary = state.summary(today);
    info!("{}", format_summary_line(&summary));

    let output = serde_json::json!({
        "summary": summary,
        "monthlyProfit": summary.monthly_profit(),
        "reports": state.reports(),
        "yearOverview": year_overview(state.transactions(), today.year()),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(Error::from)?
    );

    Ok(())
}
