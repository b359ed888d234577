//! Strategist Core Library
//!
//! Core functionality for the strategist product-strategy engine.
//!
//! # Features
//! - Web research over the Tavily search API (pains, competitors, trends)
//! - LLM-backed strategy generation with tolerant JSON parsing
//! - Deterministic markdown rendering of strategy documents
//! - SQLite-backed vector memory with cosine similarity search

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod research;
pub mod store;
pub mod strategy;

pub use config::{Config, LLMServiceConfig, SearchServiceConfig, StoreConfig};
pub use error::{Error, Result, StrategistError};
pub use llm::{ChatMessage, Embedder, HttpEmbedder, LLMClient, MetricsSnapshot, OpenAIClient};
pub use pipeline::{SaveStatus, StrategyPipeline, StrategyRequest, StrategyRunOutput};
pub use research::{
    build_research_bundle, ProductContext, RawResultSet, ResearchBundle, SearchClient, SearchHit,
    SearchOptions, TavilyClient, DEFAULT_COMPANY_TYPE,
};
pub use store::{Database, SimilarStrategy, StrategyRecord, StrategyStore, DEFAULT_TOP_K};
pub use strategy::{
    build_strategy_prompt, parse_strategy_response, render, FeatureIdea, FeatureScore, Prd,
    PrioritizedFeature, Roadmap, StrategyDocument, StrategyGenerator, SYSTEM_PROMPT,
};

/// Default data directory name
pub const DATA_DIR_NAME: &str = "strategist";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "strategist";
