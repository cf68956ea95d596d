// src/cli/search.rs
// One-shot lookup: print a fact or the notification a user would see

use anyhow::Result;
use std::sync::Arc;

use crate::config::FactdeckConfig;
use crate::extract::FactExtractor;
use crate::services::FactFinder;
use crate::tools::wikipedia::WikipediaClient;

/// Build the finder described by `config`
pub fn build_finder(config: &FactdeckConfig) -> Result<FactFinder> {
    let client = WikipediaClient::new(config.wikipedia_config())?;
    Ok(FactFinder::new(
        Arc::new(client),
        FactExtractor::new(config.extract_policy()),
        config.query_policy(),
    ))
}

pub async fn run_search(config: &FactdeckConfig, query: &[String]) -> Result<()> {
    let finder = build_finder(config)?;
    let query = query.join(" ");

    match finder.find(&query).await {
        Ok(fact) => println!("{}", fact.content),
        Err(e) => eprintln!("Error: {}", e.user_message()),
    }

    Ok(())
}
