// src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{FactStore, NewFact, StoredFact};
use crate::error::Result;

/// Process-lifetime store keyed by an auto-incrementing id starting at 1
#[derive(Debug)]
pub struct MemoryFactStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    facts: BTreeMap<i64, StoredFact>,
    next_id: i64,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                facts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryFactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactStore for MemoryFactStore {
    async fn list_facts(&self) -> Result<Vec<StoredFact>> {
        let inner = self.inner.read().await;
        Ok(inner.facts.values().cloned().collect())
    }

    async fn add_fact(&self, fact: NewFact) -> Result<StoredFact> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let stored = StoredFact {
            id,
            content: fact.content,
            source: fact.source,
            timestamp: Utc::now(),
        };
        inner.facts.insert(id, stored.clone());
        debug!(id, "stored fact in memory");

        Ok(stored)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fact(content: &str) -> NewFact {
        NewFact::new(Some(content.to_string()), Some("test".to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_ids_increment_from_one() {
        let store = MemoryFactStore::new();
        let first = store.add_fact(new_fact("first")).await.unwrap();
        let second = store.add_fact(new_fact("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn test_list_returns_in_id_order() {
        let store = MemoryFactStore::new();
        for content in ["a", "b", "c"] {
            store.add_fact(new_fact(content)).await.unwrap();
        }

        let facts = store.list_facts().await.unwrap();
        let contents: Vec<_> = facts.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert_eq!(facts[2].source, "test");
    }
}
