//! Strategy record storage
//!
//! Rows are append-only: there is no update or delete path, and every
//! successful save is durable and unversioned.

use super::vectors::{bytes_to_embedding, embedding_to_bytes};
use super::Database;
use crate::error::Result;
use crate::research::ResearchBundle;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One persisted strategy run, as read back from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRecord {
    pub id: String,
    pub product_name: String,
    pub target_users: String,
    pub goal: String,
    pub company_type: String,
    pub constraints: String,
    pub queries: serde_json::Value,
    pub raw_results: serde_json::Value,
    pub strategy_json: serde_json::Value,
    pub strategy_markdown: String,
    #[serde(skip_serializing, default)]
    pub embedding: Vec<f32>,
    pub embedding_model: String,
    pub created_at: String,
}

/// Generate a record id: hex digest prefix over the markdown plus the
/// creation timestamp, so identical strategies saved twice get distinct ids.
fn generate_record_id(markdown: &str, created_at: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(markdown.as_bytes());
    hasher.update(created_at.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest.chars().take(12).collect()
}

impl Database {
    /// Insert one strategy record and return its generated id
    pub fn insert_strategy(
        &self,
        bundle: &ResearchBundle,
        strategy_json: &serde_json::Value,
        strategy_markdown: &str,
        embedding: &[f32],
        embedding_model: &str,
    ) -> Result<String> {
        let created_at = Utc::now().to_rfc3339();
        let id = generate_record_id(strategy_markdown, &created_at);

        self.conn.execute(
            "INSERT INTO strategies
                (id, product_name, target_users, goal, company_type, constraints,
                 queries, raw_results, strategy_json, strategy_markdown,
                 embedding, embedding_model, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                id,
                bundle.product_name,
                bundle.target_users,
                bundle.goal,
                bundle.company_type,
                bundle.constraints,
                serde_json::to_string(&bundle.queries)?,
                serde_json::to_string(&bundle.raw_results)?,
                serde_json::to_string(strategy_json)?,
                strategy_markdown,
                embedding_to_bytes(embedding),
                embedding_model,
                created_at,
            ],
        )?;

        Ok(id)
    }

    /// Fetch a full record by id
    pub fn get_strategy(&self, id: &str) -> Result<Option<StrategyRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, product_name, target_users, goal, company_type, constraints,
                        queries, raw_results, strategy_json, strategy_markdown,
                        embedding, embedding_model, created_at
                 FROM strategies WHERE id = ?1",
                params![id],
                |row| {
                    let queries: String = row.get(6)?;
                    let raw_results: String = row.get(7)?;
                    let strategy_json: String = row.get(8)?;
                    let embedding_bytes: Vec<u8> = row.get(10)?;

                    Ok(StrategyRecord {
                        id: row.get(0)?,
                        product_name: row.get(1)?,
                        target_users: row.get(2)?,
                        goal: row.get(3)?,
                        company_type: row.get(4)?,
                        constraints: row.get(5)?,
                        queries: serde_json::from_str(&queries).unwrap_or_default(),
                        raw_results: serde_json::from_str(&raw_results).unwrap_or_default(),
                        strategy_json: serde_json::from_str(&strategy_json).unwrap_or_default(),
                        strategy_markdown: row.get(9)?,
                        embedding: bytes_to_embedding(&embedding_bytes),
                        embedding_model: row.get(11)?,
                        created_at: row.get(12)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    /// All stored embeddings, keyed by record id
    pub fn all_embeddings(&self) -> Result<Vec<(String, Vec<f32>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, embedding FROM strategies")?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let bytes: Vec<u8> = row.get(1)?;
            Ok((id, bytes_to_embedding(&bytes)))
        })?;

        let mut embeddings = Vec::new();
        for row in rows {
            embeddings.push(row?);
        }
        Ok(embeddings)
    }

    /// Similarity-search projection for one record
    pub fn get_strategy_projection(&self, id: &str) -> Result<Option<(String, String)>> {
        let projection = self
            .conn
            .query_row(
                "SELECT product_name, strategy_markdown FROM strategies WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(projection)
    }

    /// Number of stored strategies
    pub fn count_strategies(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM strategies", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
