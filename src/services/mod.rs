// src/services/mod.rs

pub mod finder;

pub use finder::FactFinder;
