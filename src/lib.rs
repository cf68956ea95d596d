// src/lib.rs

pub mod api;
pub mod carousel;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod facts;
pub mod favorites;
pub mod services;
pub mod state;
pub mod store;
pub mod tools;

pub use error::{FactError, Result};
pub use state::AppState;
