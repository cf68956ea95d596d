// src/tools/mod.rs

pub mod wikipedia;

pub use wikipedia::{ExtractSource, RawExtract, WikipediaClient};
