mod query;
mod update;

use brandpulse_db::MentionStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandpulse")]
#[command(about = "Collect, score and inspect Reddit brand mentions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch new mentions, score them and append them to the store (default)
    Update,
    /// Show stored mention counts per brand and sentiment label
    Status,
    /// Write every stored mention to stdout as CSV
    Export,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries command output (CSV for `export`), so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = MentionStore::new(&config.db_path);

    match cli.command {
        None | Some(Commands::Update) => update::run_update(&config, &store).await,
        Some(Commands::Status) => query::run_status(&store).await,
        Some(Commands::Export) => query::run_export(&store).await,
    }
}
