// src/extract/mod.rs

//! Turns a raw encyclopedia passage into one display-ready fact.
//!
//! Pipeline: first sentence → drop `( ... )` spans → normalize whitespace →
//! truncate → optional lead-in. See [`ExtractPolicy`] for the knobs.

pub mod query;

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use tracing::debug;

use crate::error::{FactError, Result};

pub use query::QueryPolicy;

static RE_PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r" ([.,;:!?])").expect("valid regex"));

pub const DEFAULT_MAX_CHARS: usize = 150;
pub const DEFAULT_ELLIPSIS: &str = "...";
pub const DEFAULT_LEAD_IN: &str = "Did you know? ";

const NO_FACT_FOUND: &str = "No fact found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractPolicy {
    /// Keep only the first sentence (default: true)
    pub first_sentence: bool,
    /// Character limit before the ellipsis is applied (default: 150)
    pub max_chars: Option<usize>,
    /// Marker appended to truncated facts (default: "...")
    pub ellipsis: String,
    /// Prefix added to every fact (default: "Did you know? ")
    pub lead_in: Option<String>,
}

impl Default for ExtractPolicy {
    fn default() -> Self {
        Self {
            first_sentence: true,
            max_chars: Some(DEFAULT_MAX_CHARS),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            lead_in: Some(DEFAULT_LEAD_IN.to_string()),
        }
    }
}

impl ExtractPolicy {
    /// The simpler policy: whole passage, cleaned, never truncated
    pub fn whole_extract() -> Self {
        Self {
            first_sentence: false,
            max_chars: None,
            ..Self::default()
        }
    }

    pub fn without_lead_in(mut self) -> Self {
        self.lead_in = None;
        self
    }

    pub fn for_mode(mode: ExtractMode) -> Self {
        match mode {
            ExtractMode::FirstSentence => Self::default(),
            ExtractMode::Whole => Self::whole_extract(),
        }
    }
}

/// Which of the two extraction policies to start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    #[default]
    FirstSentence,
    Whole,
}

impl FromStr for ExtractMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-sentence" | "sentence" | "first" => Ok(ExtractMode::FirstSentence),
            "whole" | "full" => Ok(ExtractMode::Whole),
            other => Err(format!("unknown extract policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FactExtractor {
    policy: ExtractPolicy,
}

impl FactExtractor {
    pub fn new(policy: ExtractPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ExtractPolicy {
        &self.policy
    }

    /// Produce the display string for `raw`.
    ///
    /// An empty passage, or one that cleans down to nothing, is a
    /// [`FactError::NoResults`].
    pub fn extract(&self, raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            return Err(FactError::NoResults(NO_FACT_FOUND.to_string()));
        }

        let sentence = if self.policy.first_sentence {
            first_sentence(raw)
        } else {
            raw
        };

        let cleaned = clean_text(sentence);
        if cleaned.is_empty() {
            debug!(raw_len = raw.len(), "passage cleaned down to nothing");
            return Err(FactError::NoResults(NO_FACT_FOUND.to_string()));
        }

        let body = match self.policy.max_chars {
            Some(limit) => truncate_chars(&cleaned, limit, &self.policy.ellipsis),
            None => cleaned,
        };

        Ok(match &self.policy.lead_in {
            Some(lead_in) => format!("{lead_in}{body}"),
            None => body,
        })
    }
}

/// Text through the first `.`, `!` or `?` that is followed by whitespace or
/// the end of the passage. Terminators inside parentheses do not count; an
/// unclosed `(` does not open a span.
pub fn first_sentence(text: &str) -> &str {
    let unclosed = unclosed_parens(text);
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '(' if !unclosed.contains(&idx) => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '.' | '!' | '?' if depth == 0 => {
                let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
                if at_boundary {
                    return &text[..idx + ch.len_utf8()];
                }
            }
            _ => {}
        }
    }

    text
}

/// Byte offsets of every `(` that no later `)` closes
fn unclosed_parens(text: &str) -> Vec<usize> {
    let mut open = Vec::new();
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => open.push(idx),
            ')' => {
                open.pop();
            }
            _ => {}
        }
    }
    open
}

/// Drop parenthetical spans, collapse whitespace and tidy the space that a
/// dropped span leaves before punctuation
pub fn clean_text(text: &str) -> String {
    let without_refs = RE_PARENTHETICAL.replace_all(text, "");
    let collapsed = RE_WHITESPACE.replace_all(&without_refs, " ");
    let tidied = RE_SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1");
    tidied.trim().to_string()
}

/// Keep the first `limit` characters and append `ellipsis` if anything was cut
pub fn truncate_chars(text: &str, limit: usize, ellipsis: &str) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ellipsis),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> FactExtractor {
        FactExtractor::new(ExtractPolicy::default().without_lead_in())
    }

    #[test]
    fn test_citation_removed_and_first_sentence_kept() {
        let fact = plain()
            .extract("A fact (with a citation). Second sentence.")
            .unwrap();
        assert_eq!(fact, "A fact.");
        assert!(!fact.contains("  "));
    }

    #[test]
    fn test_long_text_without_terminator_is_truncated() {
        let raw = "a".repeat(200);
        let fact = plain().extract(&raw).unwrap();
        assert_eq!(fact, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let raw = "b".repeat(150);
        assert_eq!(plain().extract(&raw).unwrap(), raw);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let raw = "é".repeat(160);
        let fact = plain().extract(&raw).unwrap();
        assert_eq!(fact.chars().count(), 153);
        assert!(fact.ends_with("é..."));
    }

    #[test]
    fn test_lead_in_is_prefixed() {
        let fact = FactExtractor::default()
            .extract("Otters hold hands   while sleeping!  They also juggle rocks.")
            .unwrap();
        assert_eq!(fact, "Did you know? Otters hold hands while sleeping!");
    }

    #[test]
    fn test_terminator_needs_following_space() {
        assert_eq!(first_sentence("Version 2.5 shipped. Then more."), "Version 2.5 shipped.");
        assert_eq!(first_sentence("No terminator here"), "No terminator here");
        assert_eq!(first_sentence("Ends here?"), "Ends here?");
    }

    #[test]
    fn test_terminator_inside_parentheses_ignored() {
        let raw = "The pyramid (c. 2560 BC) is the oldest. It is large.";
        assert_eq!(first_sentence(raw), "The pyramid (c. 2560 BC) is the oldest.");
        assert_eq!(plain().extract(raw).unwrap(), "The pyramid is the oldest.");
    }

    #[test]
    fn test_unclosed_paren_does_not_swallow_terminators() {
        let raw = "Mercury (the smallest planet. It orbits the Sun closest. It has no moons.";
        assert_eq!(first_sentence(raw), "Mercury (the smallest planet.");
        assert_eq!(plain().extract(raw).unwrap(), "Mercury (the smallest planet.");

        let raw = "Venus (c. 2 AU) is hot (very. It spins backwards.";
        assert_eq!(first_sentence(raw), "Venus (c. 2 AU) is hot (very.");
    }

    #[test]
    fn test_whole_extract_policy_keeps_all_sentences() {
        let extractor = FactExtractor::new(ExtractPolicy::whole_extract());
        let fact = extractor
            .extract("Rust (programming language) is fast.\nIt is also safe.")
            .unwrap();
        assert_eq!(fact, "Did you know? Rust is fast. It is also safe.");
    }

    #[test]
    fn test_extract_mode_selects_policy() {
        assert_eq!("whole".parse::<ExtractMode>().unwrap(), ExtractMode::Whole);
        assert_eq!(" First-Sentence ".parse::<ExtractMode>().unwrap(), ExtractMode::FirstSentence);
        assert!("summary".parse::<ExtractMode>().is_err());
        assert_eq!(ExtractPolicy::for_mode(ExtractMode::Whole), ExtractPolicy::whole_extract());
        assert_eq!(ExtractPolicy::for_mode(ExtractMode::FirstSentence), ExtractPolicy::default());
    }

    #[test]
    fn test_empty_extract_is_no_results() {
        let err = plain().extract("   \n").unwrap_err();
        assert!(matches!(err, FactError::NoResults(_)));
    }

    #[test]
    fn test_only_parenthetical_is_no_results() {
        let err = plain().extract("(just a citation)").unwrap_err();
        assert!(matches!(err, FactError::NoResults(_)));
    }
}
