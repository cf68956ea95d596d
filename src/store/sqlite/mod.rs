// src/store/sqlite/mod.rs

pub mod migration;
pub mod store;

pub use store::SqliteFactStore;
