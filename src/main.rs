use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    info!(
        "Starting wallet database initializer v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let report = wallet_db_init::run_from_env().await?;

    info!(
        user = %report.user,
        indexes = report.indexes.len(),
        "initialization complete"
    );

    // The one line of output the invoking startup mechanism watches for.
    println!("{}", report.notice());

    Ok(())
}
