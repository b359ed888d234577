//! Persistence layer
//!
//! SQLite-backed append-only store for strategy runs, with embeddings kept
//! as BLOBs and cosine similarity computed in Rust.

mod gateway;
mod schema;
mod strategies;
pub mod vectors;

pub use gateway::{SimilarStrategy, StrategyStore, DEFAULT_TOP_K};
pub use schema::Database;
pub use strategies::StrategyRecord;

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::DATA_DIR_NAME)
            .join("strategies.sqlite")
    }
}
