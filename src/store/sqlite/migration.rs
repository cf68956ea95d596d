// src/store/sqlite/migration.rs
//! Schema for the durable fact store. Safe to run at every startup.

use sqlx::{Executor, SqlitePool};

use crate::error::Result;

const CREATE_FACTS: &str = r#"
CREATE TABLE IF NOT EXISTS facts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    source TEXT NOT NULL,
    timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_FACTS).await?;
    Ok(())
}
