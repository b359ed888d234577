//! LLM integration
//!
//! Provides traits and implementations for:
//! - Chat completions via OpenAI-compatible services
//! - Embedding generation for the vector memory

mod client;
mod embedder;

pub use client::{APIMetrics, ChatMessage, LLMClient, MetricsSnapshot, OpenAIClient};
pub use embedder::{Embedder, HttpEmbedder};
