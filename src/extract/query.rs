// src/extract/query.rs
// Local checks run on a search query before anything goes over the network

use tracing::warn;

use crate::error::{FactError, Result};

pub const DEFAULT_MAX_WORDS: usize = 3;

/// Small fixed word list. This is a courtesy filter, not a moderation guarantee.
pub const DEFAULT_DENYLIST: &[&str] = &["porn", "nsfw", "xxx", "nude", "gore"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Maximum whitespace-separated tokens; `None` disables the check
    pub max_words: Option<usize>,
    /// Terms rejected by case-insensitive substring match
    pub denylist: Vec<String>,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            max_words: Some(DEFAULT_MAX_WORDS),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl QueryPolicy {
    /// Only the non-empty check
    pub fn permissive() -> Self {
        Self {
            max_words: None,
            denylist: Vec::new(),
        }
    }

    /// Validate `query`, returning it trimmed
    pub fn validate<'a>(&self, query: &'a str) -> Result<&'a str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(FactError::InputRejected("Please enter a search term".to_string()));
        }

        if let Some(max_words) = self.max_words {
            let words = trimmed.split_whitespace().count();
            if words > max_words {
                warn!(words, max_words, "query rejected: too many words");
                return Err(FactError::InputRejected(format!(
                    "Please use at most {max_words} words"
                )));
            }
        }

        let lowered = trimmed.to_lowercase();
        if self
            .denylist
            .iter()
            .any(|term| !term.is_empty() && lowered.contains(&term.to_lowercase()))
        {
            warn!("query rejected: denylisted term");
            return Err(FactError::InputRejected(
                "That search term is not allowed".to_string(),
            ));
        }

        Ok(trimmed)
    }
}
