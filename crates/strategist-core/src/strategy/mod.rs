//! Strategy generation
//!
//! Prompt assembly, LLM-backed generation with tolerant parsing, and the
//! deterministic markdown projection of the result.

mod document;
mod generator;
mod markdown;
mod prompt;

pub use document::{
    FeatureIdea, FeatureScore, Prd, PrioritizedFeature, Roadmap, StrategyDocument, REQUIRED_KEYS,
};
pub use generator::{parse_strategy_response, StrategyGenerator};
pub use markdown::render;
pub use prompt::{build_strategy_prompt, SYSTEM_PROMPT};
