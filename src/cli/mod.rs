// src/cli/mod.rs
// Command-line surface of the factdeck binary

use clap::{Parser, Subcommand};

pub mod carousel;
pub mod search;
pub mod serve;

pub use carousel::run_carousel;
pub use search::run_search;
pub use serve::run_server;

use crate::config::FactdeckConfig;
use crate::extract::ExtractMode;
use crate::store::StoreBackend;
use crate::tools::wikipedia::SearchMode;

#[derive(Parser)]
#[command(name = "factdeck")]
#[command(about = "Rotating random facts with Wikipedia search")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the facts HTTP API (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Storage backend: memory or sqlite
        #[arg(long)]
        store: Option<StoreBackend>,

        /// SQLite database URL (sqlite backend only)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Look up one fact on Wikipedia and print it
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Fetch the page titled exactly like the query instead of searching
        #[arg(long)]
        direct: bool,

        /// Print the whole cleaned extract instead of its first sentence
        #[arg(long)]
        whole: bool,
    },

    /// Run the interactive fact carousel in the terminal
    Carousel {
        /// Shuffle the built-in facts for this session
        #[arg(long)]
        shuffle: bool,

        /// How long each fact stays on screen
        #[arg(long)]
        dwell_ms: Option<u64>,

        /// Progress update interval
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Allow search queries of any length
        #[arg(long)]
        no_limit: bool,

        /// Show whole cleaned extracts for search results
        #[arg(long)]
        whole: bool,
    },
}

impl Commands {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut FactdeckConfig) {
        match self {
            Commands::Serve {
                host,
                port,
                store,
                database_url,
            } => {
                if let Some(host) = host {
                    config.host = host.clone();
                }
                if let Some(port) = port {
                    config.port = *port;
                }
                if let Some(store) = store {
                    config.store = *store;
                }
                if let Some(database_url) = database_url {
                    config.database_url = database_url.clone();
                }
            }
            Commands::Search { direct, whole, .. } => {
                if *direct {
                    config.search_mode = SearchMode::DirectTitle;
                }
                if *whole {
                    config.extract_mode = ExtractMode::Whole;
                }
            }
            Commands::Carousel {
                shuffle,
                dwell_ms,
                tick_ms,
                no_limit,
                whole,
            } => {
                config.shuffle |= *shuffle;
                if let Some(dwell_ms) = dwell_ms {
                    config.dwell_ms = *dwell_ms;
                }
                if let Some(tick_ms) = tick_ms {
                    config.tick_ms = *tick_ms;
                }
                if *no_limit {
                    config.max_query_words = 0;
                }
                if *whole {
                    config.extract_mode = ExtractMode::Whole;
                }
            }
        }
    }
}
