use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flight_engine::cli::{Cli, Commands, ledger, plan, reach, rebalance};
use flight_engine::ingest;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(cli.log_level.as_deref().unwrap_or("warn"))
    });
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    let loaded = ingest::load_path(&cli.flights)
        .with_context(|| format!("failed to load {}", cli.flights.display()))?;
    let records = loaded.records;

    match cli.command {
        Commands::Reach(args) => reach::execute(&args, &records, cli.format),
        Commands::Plan(args) => plan::execute(args, records, cli.format).await,
        Commands::Ledger(args) => ledger::execute(args, &records, cli.format).await,
        Commands::Rebalance(args) => rebalance::execute(&args, &records, cli.format),
    }
}
