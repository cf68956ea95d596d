// src/services/finder.rs
// Query → remote extract → display fact, one search in flight at a time

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::error::{FactError, Result};
use crate::extract::{FactExtractor, QueryPolicy};
use crate::facts::Fact;
use crate::tools::wikipedia::ExtractSource;

pub struct FactFinder {
    source: Arc<dyn ExtractSource>,
    extractor: FactExtractor,
    query_policy: QueryPolicy,
    loading: AtomicBool,
}

impl FactFinder {
    pub fn new(
        source: Arc<dyn ExtractSource>,
        extractor: FactExtractor,
        query_policy: QueryPolicy,
    ) -> Self {
        Self {
            source,
            extractor,
            query_policy,
            loading: AtomicBool::new(false),
        }
    }

    /// True while a search is waiting on the remote source
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Validate `query`, fetch a passage and extract a fact from it.
    ///
    /// Rejected input never reaches the source. A second call while one is
    /// pending fails with [`FactError::Busy`].
    pub async fn find(&self, query: &str) -> Result<Fact> {
        let query = self.query_policy.validate(query)?;
        let _loading = LoadingGuard::acquire(&self.loading)?;

        let result = self.fetch_and_extract(query).await;
        match &result {
            Ok(fact) => info!(query, source = self.source.source_name(), fact = %fact.content, "found fact"),
            Err(e) => warn!(query, error = %e, "search failed"),
        }
        result
    }

    async fn fetch_and_extract(&self, query: &str) -> Result<Fact> {
        let raw = self.source.fetch_extract(query).await?;
        let content = self.extractor.extract(&raw.text)?;
        Ok(Fact::from_search(content))
    }
}

/// Holds the loading flag; released on every exit path, including a dropped future
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FactError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
