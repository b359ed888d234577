//! Persistence gateway
//!
//! Couples the database with an embedder: saving embeds the rendered
//! markdown first (no record is written without its vector), reading is
//! nearest-neighbor over the stored vectors.

use super::vectors::cosine_similarity;
use super::{Database, StrategyRecord};
use crate::config::{LLMServiceConfig, StoreConfig};
use crate::error::Result;
use crate::llm::{Embedder, HttpEmbedder};
use crate::research::ResearchBundle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default number of matches returned by similarity search
pub const DEFAULT_TOP_K: usize = 3;

/// One similarity-search match. Internal record ids are not part of this
/// projection; callers wanting the full record go through `get_by_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarStrategy {
    pub product_name: String,
    pub score: f32,
    pub strategy_markdown: String,
}

/// Strategy store: append-only writes plus a similarity read path
pub struct StrategyStore {
    db: Database,
    embedder: Arc<dyn Embedder>,
    candidate_pool: usize,
}

impl StrategyStore {
    /// Create from an open database and an embedder
    pub fn new(db: Database, embedder: Arc<dyn Embedder>, candidate_pool: usize) -> Self {
        Self {
            db,
            embedder,
            candidate_pool,
        }
    }

    /// Create from configuration (opens the database, builds the embedder)
    pub fn from_config(store_config: &StoreConfig, llm_config: LLMServiceConfig) -> Result<Self> {
        let db = Database::open(&store_config.path)?;
        db.initialize()?;
        let embedder = HttpEmbedder::from_config(llm_config)?;
        Ok(Self::new(
            db,
            Arc::new(embedder),
            store_config.candidate_pool,
        ))
    }

    /// Embed the rendered markdown and append one record.
    ///
    /// The embedding call comes first: if it fails, nothing is written.
    pub async fn save(
        &self,
        bundle: &ResearchBundle,
        strategy_json: &serde_json::Value,
        strategy_markdown: &str,
    ) -> Result<String> {
        let embedding = self.embedder.embed(strategy_markdown).await?;

        let id = self.db.insert_strategy(
            bundle,
            strategy_json,
            strategy_markdown,
            &embedding,
            self.embedder.model_name(),
        )?;

        tracing::info!("Saved strategy {} ({})", id, bundle.product_name);
        Ok(id)
    }

    /// Nearest-neighbor search over stored strategies.
    ///
    /// Embeds the query, scores every stored vector, keeps the best
    /// `candidate_pool` and returns `top_k` projected rows.
    pub async fn search_similar(&self, query: &str, top_k: usize) -> Result<Vec<SimilarStrategy>> {
        let query_embedding = self.embedder.embed(query).await?;

        let mut similarities: Vec<(String, f32)> = self
            .db
            .all_embeddings()?
            .into_iter()
            .map(|(id, embedding)| {
                let score = cosine_similarity(&query_embedding, &embedding);
                (id, score)
            })
            .collect();

        similarities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut matches = Vec::new();
        for (id, score) in similarities.into_iter().take(self.candidate_pool) {
            if matches.len() >= top_k {
                break;
            }
            if let Some((product_name, strategy_markdown)) =
                self.db.get_strategy_projection(&id)?
            {
                matches.push(SimilarStrategy {
                    product_name,
                    score,
                    strategy_markdown,
                });
            }
        }

        Ok(matches)
    }

    /// Full record by id
    pub fn get_by_id(&self, id: &str) -> Result<Option<StrategyRecord>> {
        self.db.get_strategy(id)
    }

    /// Number of stored strategies
    pub fn count(&self) -> Result<usize> {
        self.db.count_strategies()
    }

    /// Embedding model backing this store
    pub fn embedding_model(&self) -> &str {
        self.embedder.model_name()
    }
}
