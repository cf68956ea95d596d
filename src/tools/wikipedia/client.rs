// src/tools/wikipedia/client.rs

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::types::{ExtractResponse, Page, SearchResponse};
use super::{ExtractSource, RawExtract, SearchMode, WikipediaConfig};
use crate::error::{FactError, Result};

/// Client for the MediaWiki action API.
///
/// Every request carries `origin=*`, the anonymous CORS parameter the public
/// API expects from browser-style callers.
pub struct WikipediaClient {
    config: WikipediaConfig,
    http_client: Client,
}

impl WikipediaClient {
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &WikipediaConfig {
        &self.config
    }

    /// Search, pick a random hit among the top results, fetch its extract
    pub async fn search_then_fetch(&self, query: &str) -> Result<RawExtract> {
        let hits = self
            .get_json::<SearchResponse>(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
            ])
            .await?
            .hits();

        if hits.is_empty() {
            return Err(FactError::NoResults("No results found".to_string()));
        }

        let pool = hits.len().min(self.config.top_results.max(1));
        let pick = rand::rng().random_range(0..pool);
        let hit = &hits[pick];
        debug!(query, pick, pool, page_id = hit.pageid, "picked search hit");

        let page_id = hit.pageid.to_string();
        let mut pages = self
            .get_json::<ExtractResponse>(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exsentences", "2"),
                ("exlimit", "1"),
                ("explaintext", "1"),
                ("pageids", page_id.as_str()),
                ("format", "json"),
            ])
            .await?
            .pages();

        let page = pages.remove(&page_id).unwrap_or(Page {
            pageid: Some(hit.pageid),
            title: Some(hit.title.clone()),
            extract: None,
        });
        into_raw_extract(page)
    }

    /// Fetch the intro extract of the page whose title is the query
    pub async fn direct_title(&self, query: &str) -> Result<RawExtract> {
        let pages = self
            .get_json::<ExtractResponse>(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("titles", query),
            ])
            .await?
            .pages();

        let page = pages
            .into_values()
            .next()
            .ok_or_else(|| FactError::NoResults("No results found".to_string()))?;
        into_raw_extract(page)
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http_client
            .get(&self.config.api_url)
            .query(params)
            .query(&[("origin", "*")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Network(format!("Wikipedia API returned {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FactError::Network(format!("Failed to parse Wikipedia response: {e}")))
    }
}

#[async_trait]
impl ExtractSource for WikipediaClient {
    async fn fetch_extract(&self, query: &str) -> Result<RawExtract> {
        info!(query, mode = ?self.config.mode, "fetching extract from Wikipedia");
        match self.config.mode {
            SearchMode::SearchThenFetch => self.search_then_fetch(query).await,
            SearchMode::DirectTitle => self.direct_title(query).await,
        }
    }

    fn source_name(&self) -> &str {
        "Wikipedia"
    }
}

fn into_raw_extract(page: Page) -> Result<RawExtract> {
    match page.extract {
        Some(text) if !text.trim().is_empty() => Ok(RawExtract {
            page_id: page.pageid,
            title: page.title,
            text,
        }),
        _ => Err(FactError::NoResults("No fact found".to_string())),
    }
}
