// src/store/mod.rs

//! Persistence for user-submitted facts.
//! Route handlers only ever see `Arc<dyn FactStore>`; the backend is picked
//! once at startup.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::error::{FactError, FieldViolation, Result};

pub use memory::MemoryFactStore;
pub use sqlite::SqliteFactStore;

/// A fact as stored, with its generated id and creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFact {
    pub id: i64,
    pub content: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// A validated fact ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFact {
    content: String,
    source: String,
}

impl NewFact {
    /// Both fields are required and must contain non-whitespace text
    pub fn new(content: Option<String>, source: Option<String>) -> Result<Self> {
        let mut violations = Vec::new();
        let content = required_text("content", content, &mut violations);
        let source = required_text("source", source, &mut violations);

        match (content, source) {
            (Some(content), Some(source)) if violations.is_empty() => Ok(Self { content, source }),
            _ => Err(FactError::Validation(violations)),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn required_text(
    field: &str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation::new(field, "is required"));
            None
        }
        Some(text) if text.trim().is_empty() => {
            violations.push(FieldViolation::new(field, "must not be empty"));
            None
        }
        Some(text) => Some(text),
    }
}

/// The two-operation persistence capability
#[async_trait]
pub trait FactStore: Send + Sync {
    /// All stored facts in ascending id order
    async fn list_facts(&self) -> Result<Vec<StoredFact>>;

    /// Append a fact, returning it with its generated id and timestamp
    async fn add_fact(&self, fact: NewFact) -> Result<StoredFact>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(StoreBackend::Memory),
            "sqlite" | "sql" => Ok(StoreBackend::Sqlite),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Construct the configured store. Called once at process start.
pub async fn open_store(
    backend: StoreBackend,
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn FactStore>> {
    let store: Arc<dyn FactStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryFactStore::new()),
        StoreBackend::Sqlite => {
            Arc::new(SqliteFactStore::connect(database_url, max_connections).await?)
        }
    };
    info!(backend = store.backend_name(), "fact store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fact_requires_both_fields() {
        let err = NewFact::new(Some(String::new()), Some("x".to_string())).unwrap_err();
        match err {
            FactError::Validation(violations) => {
                assert_eq!(violations, vec![FieldViolation::new("content", "must not be empty")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = NewFact::new(None, None).unwrap_err();
        match err {
            FactError::Validation(violations) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(NewFact::new(Some("fact".to_string()), Some("   ".to_string())).is_err());
        let fact = NewFact::new(Some("fact".to_string()), Some("user".to_string())).unwrap();
        assert_eq!(fact.content(), "fact");
        assert_eq!(fact.source(), "user");
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("SQLite".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
        assert_eq!(StoreBackend::Sqlite.to_string(), "sqlite");
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(StoreBackend::Memory, "unused", 1).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert!(store.list_facts().await.unwrap().is_empty());
    }
}
