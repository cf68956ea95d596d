// src/tools/wikipedia/mod.rs

pub mod client;
pub mod types;

use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;

pub use client::WikipediaClient;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Which request shape is used to turn a query into an extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Full-text search, then fetch the extract of a random top hit
    #[default]
    SearchThenFetch,
    /// Fetch the intro extract of the page titled exactly like the query
    DirectTitle,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "search-then-fetch" => Ok(SearchMode::SearchThenFetch),
            "direct" | "title" => Ok(SearchMode::DirectTitle),
            other => Err(format!("unknown search mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    pub api_url: String,
    pub mode: SearchMode,
    /// A random hit is chosen among this many top results
    pub top_results: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            mode: SearchMode::SearchThenFetch,
            top_results: 5,
            timeout: Duration::from_secs(10),
            user_agent: concat!("factdeck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Raw passage returned by the remote collaborator, before cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtract {
    pub page_id: Option<u64>,
    pub title: Option<String>,
    pub text: String,
}

/// Anything that can turn a query into a raw passage
#[async_trait]
pub trait ExtractSource: Send + Sync {
    async fn fetch_extract(&self, query: &str) -> Result<RawExtract>;

    fn source_name(&self) -> &str;
}
