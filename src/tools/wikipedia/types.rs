// src/tools/wikipedia/types.rs
// Response shapes of the MediaWiki action API that we read

use serde::Deserialize;
use std::collections::BTreeMap;

/// `action=query&list=search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub pageid: u64,
    #[serde(default)]
    pub title: String,
}

/// `action=query&prop=extracts`
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    /// Keyed by page id as a string; missing titles come back under "-1"
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl SearchResponse {
    pub fn hits(self) -> Vec<SearchHit> {
        self.query.map(|q| q.search).unwrap_or_default()
    }
}

impl ExtractResponse {
    pub fn pages(self) -> BTreeMap<String, Page> {
        self.query.map(|q| q.pages).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "batchcomplete": "",
            "query": {
                "searchinfo": {"totalhits": 2},
                "search": [
                    {"ns": 0, "title": "Honey", "pageid": 13590, "snippet": "..."},
                    {"ns": 0, "title": "Honey bee", "pageid": 14203, "snippet": "..."}
                ]
            }
        }"#;
        let hits = serde_json::from_str::<SearchResponse>(body).unwrap().hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].pageid, 14203);
        assert_eq!(hits[0].title, "Honey");
    }

    #[test]
    fn test_parse_missing_page() {
        let body = r#"{"query": {"pages": {"-1": {"ns": 0, "title": "Zzxq", "missing": ""}}}}"#;
        let pages = serde_json::from_str::<ExtractResponse>(body).unwrap().pages();
        let page = pages.get("-1").unwrap();
        assert!(page.extract.is_none());
        assert!(page.pageid.is_none());
    }

    #[test]
    fn test_parse_without_query_block() {
        let hits = serde_json::from_str::<SearchResponse>("{}").unwrap().hits();
        assert!(hits.is_empty());
    }
}
