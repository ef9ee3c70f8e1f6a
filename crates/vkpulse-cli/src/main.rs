mod export;
mod fetch;
mod report;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::fetch::FetchArgs;

#[derive(Debug, Parser)]
#[command(name = "vkpulse")]
#[command(about = "VK newsfeed search analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch posts for a query, print daily metrics and export them to CSV
    Fetch(FetchArgs),
    /// Print how a date range is split into request windows
    Windows {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = vkpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, ?config, "configuration loaded");

    match cli.command {
        Commands::Fetch(args) => fetch::run_fetch(&config, &args).await,
        Commands::Windows { start, end } => {
            let windows = vkpulse_newsfeed::plan_windows(start, end, config.window_days);
            report::print_windows(&windows);
            Ok(())
        }
    }
}
