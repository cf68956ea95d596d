// src/facts/mod.rs

//! Display facts and the built-in rotation they are drawn from.

mod builtin;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub use builtin::BUILTIN_FACTS;

/// Category given to facts produced from a search result
pub const SEARCH_CATEGORY: &str = "Wikipedia";

/// A short text shown to the user, with an optional topical label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Fact {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            category: None,
        }
    }

    pub fn with_category(content: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            category: Some(category.into()),
        }
    }

    /// A fact derived from a search, labelled with [`SEARCH_CATEGORY`]
    pub fn from_search(content: impl Into<String>) -> Self {
        Self::with_category(content, SEARCH_CATEGORY)
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("General")
    }
}

/// Load the built-in facts, optionally shuffled for this session
pub fn builtin_facts(shuffle: bool) -> Vec<Fact> {
    let mut facts: Vec<Fact> = BUILTIN_FACTS
        .iter()
        .map(|(category, content)| Fact::with_category(*content, *category))
        .collect();

    if shuffle {
        facts.shuffle(&mut rand::rng());
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_facts_keep_order_without_shuffle() {
        let facts = builtin_facts(false);
        assert_eq!(facts.len(), BUILTIN_FACTS.len());
        assert_eq!(facts[0].content, BUILTIN_FACTS[0].1);
        assert_eq!(facts[0].category.as_deref(), Some(BUILTIN_FACTS[0].0));
    }

    #[test]
    fn test_shuffle_keeps_every_fact() {
        let mut shuffled: Vec<String> = builtin_facts(true).into_iter().map(|f| f.content).collect();
        let mut original: Vec<String> = builtin_facts(false).into_iter().map(|f| f.content).collect();
        shuffled.sort();
        original.sort();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn test_search_fact_category() {
        let fact = Fact::from_search("Did you know? Otters hold hands.");
        assert_eq!(fact.category_or_default(), "Wikipedia");
        assert_eq!(Fact::new("plain").category_or_default(), "General");
    }
}
