// src/config/mod.rs
// Runtime configuration: .env file, then environment variables, then defaults

use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::carousel::TimerConfig;
use crate::extract::{DEFAULT_LEAD_IN, DEFAULT_MAX_CHARS, ExtractMode, ExtractPolicy, QueryPolicy};
use crate::store::StoreBackend;
use crate::tools::wikipedia::{DEFAULT_API_URL, SearchMode, WikipediaConfig};

#[derive(Debug, Clone)]
pub struct FactdeckConfig {
    // ── Server
    pub host: String,
    pub port: u16,

    // ── Storage
    pub store: StoreBackend,
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Wikipedia
    pub wikipedia_url: String,
    pub search_mode: SearchMode,
    pub search_timeout: u64,

    // ── Carousel
    pub dwell_ms: u64,
    pub tick_ms: u64,
    pub shuffle: bool,

    // ── Extraction
    pub extract_mode: ExtractMode,
    pub max_fact_chars: usize,
    pub lead_in: String,
    pub max_query_words: usize,

    // ── Logging
    pub log_level: String,
}

impl Default for FactdeckConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Parse `key` through `lookup`, falling back to `default`.
/// Inline `# comments` and surrounding whitespace are ignored.
fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => {
                    debug!(key, value = clean_val, "config value from environment");
                    parsed
                }
                Err(_) => {
                    warn!(key, value = %val, "config value failed to parse, using default");
                    default
                }
            }
        }
        None => default,
    }
}

impl FactdeckConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            debug!(".env file not found, using environment variables and defaults");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = &lookup;
        // The lead-in keeps its trailing space, so it skips the comment/trim cleanup.
        let lead_in = lookup("FACTDECK_LEAD_IN").unwrap_or_else(|| DEFAULT_LEAD_IN.to_string());

        Self {
            host: env_var_or(lookup, "FACTDECK_HOST", "0.0.0.0".to_string()),
            port: env_var_or(lookup, "FACTDECK_PORT", 5000),
            store: env_var_or(lookup, "FACTDECK_STORE", StoreBackend::Memory),
            database_url: env_var_or(lookup, "DATABASE_URL", "sqlite:./factdeck.db".to_string()),
            sqlite_max_connections: env_var_or(lookup, "FACTDECK_SQLITE_MAX_CONNECTIONS", 5),
            wikipedia_url: env_var_or(lookup, "FACTDECK_WIKIPEDIA_URL", DEFAULT_API_URL.to_string()),
            search_mode: env_var_or(lookup, "FACTDECK_SEARCH_MODE", SearchMode::SearchThenFetch),
            search_timeout: env_var_or(lookup, "FACTDECK_SEARCH_TIMEOUT", 10),
            dwell_ms: env_var_or(lookup, "FACTDECK_DWELL_MS", 10_000),
            tick_ms: env_var_or(lookup, "FACTDECK_TICK_MS", 100),
            shuffle: env_var_or(lookup, "FACTDECK_SHUFFLE", false),
            extract_mode: env_var_or(lookup, "FACTDECK_EXTRACT_POLICY", ExtractMode::FirstSentence),
            max_fact_chars: env_var_or(lookup, "FACTDECK_MAX_FACT_CHARS", DEFAULT_MAX_CHARS),
            lead_in,
            max_query_words: env_var_or(lookup, "FACTDECK_MAX_QUERY_WORDS", 3),
            log_level: env_var_or(lookup, "FACTDECK_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods for Common Operations ---

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::from_millis(self.dwell_ms, self.tick_ms)
    }

    pub fn wikipedia_config(&self) -> WikipediaConfig {
        WikipediaConfig {
            api_url: self.wikipedia_url.clone(),
            mode: self.search_mode,
            timeout: Duration::from_secs(self.search_timeout),
            ..WikipediaConfig::default()
        }
    }

    /// The whole-extract policy is never truncated, so `max_fact_chars` only
    /// applies to the first-sentence policy
    pub fn extract_policy(&self) -> ExtractPolicy {
        let mut policy = ExtractPolicy::for_mode(self.extract_mode);
        if self.extract_mode == ExtractMode::FirstSentence {
            policy.max_chars = (self.max_fact_chars > 0).then_some(self.max_fact_chars);
        }
        policy.lead_in = (!self.lead_in.is_empty()).then(|| self.lead_in.clone());
        policy
    }

    /// `max_query_words = 0` turns the word limit off
    pub fn query_policy(&self) -> QueryPolicy {
        QueryPolicy {
            max_words: (self.max_query_words > 0).then_some(self.max_query_words),
            ..QueryPolicy::default()
        }
    }
}
