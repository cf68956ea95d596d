// src/favorites.rs
// Session-scoped favorite facts, keyed by their exact text

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    order: Vec<String>,
    index: HashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `content` if absent, remove it if present. Returns whether it is
    /// a favorite afterwards.
    pub fn toggle(&mut self, content: &str) -> bool {
        if self.index.remove(content) {
            self.order.retain(|c| c != content);
            false
        } else {
            self.index.insert(content.to_string());
            self.order.push(content.to_string());
            true
        }
    }

    pub fn contains(&self, content: &str) -> bool {
        self.index.contains(content)
    }

    /// Favorites in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
