// src/store/sqlite/store.rs
//! Implements FactStore on SQLite through sqlx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

use super::migration::run_migrations;
use crate::error::Result;
use crate::store::{FactStore, NewFact, StoredFact};

pub struct SqliteFactStore {
    pub pool: SqlitePool,
}

impl SqliteFactStore {
    /// Wrap an existing pool. Run [`run_migrations`] on it first.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and migrate it
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // In-memory databases live and die with their connection, so keep exactly one.
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        run_migrations(&pool).await?;
        info!(database_url, "sqlite fact store opened");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl FactStore for SqliteFactStore {
    async fn list_facts(&self) -> Result<Vec<StoredFact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, source, timestamp
            FROM facts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut facts = Vec::with_capacity(rows.len());
        for row in rows {
            facts.push(StoredFact {
                id: row.try_get("id")?,
                content: row.try_get("content")?,
                source: row.try_get("source")?,
                timestamp: row.try_get::<DateTime<Utc>, _>("timestamp")?,
            });
        }

        Ok(facts)
    }

    async fn add_fact(&self, fact: NewFact) -> Result<StoredFact> {
        let timestamp = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO facts (content, source, timestamp)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&fact.content)
        .bind(&fact.source)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        debug!(id, "stored fact in sqlite");

        Ok(StoredFact {
            id,
            content: fact.content,
            source: fact.source,
            timestamp,
        })
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fact(content: &str, source: &str) -> NewFact {
        NewFact::new(Some(content.to_string()), Some(source.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list_in_memory_db() {
        let store = SqliteFactStore::connect("sqlite::memory:", 5).await.unwrap();

        let first = store.add_fact(new_fact("Honey never spoils.", "user")).await.unwrap();
        let second = store.add_fact(new_fact("Bananas are berries.", "wiki")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let facts = store.list_facts().await.unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].content, "Honey never spoils.");
        assert_eq!(facts[1].source, "wiki");
        assert_eq!(facts[0].timestamp.timestamp(), first.timestamp.timestamp());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let store = SqliteFactStore::connect("sqlite::memory:", 1).await.unwrap();
        run_migrations(&store.pool).await.unwrap();
        run_migrations(&store.pool).await.unwrap();
        assert!(store.list_facts().await.unwrap().is_empty());
    }
}
