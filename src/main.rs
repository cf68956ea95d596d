// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::str::FromStr;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use factdeck::cli::{Cli, Commands, run_carousel, run_search, run_server};
use factdeck::config::FactdeckConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = FactdeckConfig::from_env();
    if let Some(command) = &cli.command {
        command.apply_overrides(&mut config);
    }

    // The terminal carousel owns stdout, so logs go to stderr and stay quiet there
    let log_level = match &cli.command {
        Some(Commands::Carousel { .. }) | Some(Commands::Search { .. }) => Level::WARN,
        _ => Level::from_str(&config.log_level).unwrap_or(Level::INFO),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve { .. }) => {
            info!("Starting factdeck {}", env!("CARGO_PKG_VERSION"));
            run_server(&config).await?;
        }
        Some(Commands::Search { query, .. }) => {
            run_search(&config, &query).await?;
        }
        Some(Commands::Carousel { .. }) => {
            run_carousel(&config).await?;
        }
    }

    Ok(())
}
