//! Command implementations

pub mod recall;
pub mod research;
pub mod run;
pub mod search;
pub mod show;
pub mod status;

use anyhow::Result;
use std::sync::Arc;
use strategist_core::{Config, StrategyGenerator, StrategyPipeline, StrategyStore, TavilyClient};

/// Open the strategy store (database + embedder). Enough for the memory
/// commands; no search credentials required.
pub fn open_store(config: &Config) -> Result<StrategyStore> {
    Ok(StrategyStore::from_config(
        &config.store,
        config.llm_service.clone(),
    )?)
}

/// Build the full pipeline: search client, generator and store
pub fn build_pipeline(config: &Config) -> Result<StrategyPipeline> {
    let search = TavilyClient::new(config.search_service.clone())?;
    let generator = StrategyGenerator::from_config(config.llm_service.clone())?;
    let store = open_store(config)?;

    Ok(StrategyPipeline::new(Arc::new(search), generator, store))
}
