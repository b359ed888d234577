//! Pipeline orchestrator
//!
//! Sequences research → prompt → generation → rendering → persistence.
//! Provider-facing stages fail loudly and abort the run; the persistence
//! stage fails softly and annotates the result instead.

use crate::error::Result;
use crate::research::{
    build_research_bundle, ProductContext, RawResultSet, ResearchBundle, SearchClient,
    SearchOptions,
};
use crate::store::StrategyStore;
use crate::strategy::{render, StrategyDocument, StrategyGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inputs for one strategy run
#[derive(Debug, Clone)]
pub struct StrategyRequest {
    pub context: ProductContext,
    pub extra_instructions: String,
}

impl StrategyRequest {
    pub fn new(context: ProductContext) -> Self {
        Self {
            context,
            extra_instructions: String::new(),
        }
    }

    pub fn with_extra_instructions(mut self, extra: impl Into<String>) -> Self {
        self.extra_instructions = extra.into();
        self
    }
}

/// Outcome of the best-effort persistence stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SaveStatus {
    Ok { id: String },
    Error { error: String },
    Skipped,
}

impl SaveStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SaveStatus::Ok { .. })
    }
}

/// Full response payload for one strategy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRunOutput {
    #[serde(flatten)]
    pub research: ResearchBundle,
    pub strategy_json: serde_json::Value,
    pub strategy_markdown: String,
    pub save_status: SaveStatus,
}

/// Process-lifetime pipeline: clients are constructed once and injected
pub struct StrategyPipeline {
    search: Arc<dyn SearchClient>,
    generator: StrategyGenerator,
    store: StrategyStore,
}

impl StrategyPipeline {
    pub fn new(
        search: Arc<dyn SearchClient>,
        generator: StrategyGenerator,
        store: StrategyStore,
    ) -> Self {
        Self {
            search,
            generator,
            store,
        }
    }

    /// Run the research stage only
    pub async fn research_only(&self, context: &ProductContext) -> Result<ResearchBundle> {
        build_research_bundle(self.search.as_ref(), context).await
    }

    /// One ad-hoc web search outside the fixed research templates
    pub async fn web_search(&self, query: &str, max_results: usize) -> Result<RawResultSet> {
        let options = SearchOptions {
            max_results,
            ..SearchOptions::default()
        };
        self.search.search(query, &options).await
    }

    /// Run the full pipeline.
    ///
    /// A persistence failure does not abort the run: the computed research
    /// and strategy are still returned, with `save_status` marking the
    /// failure.
    pub async fn run(&self, request: &StrategyRequest) -> Result<StrategyRunOutput> {
        let context = &request.context;

        let research = build_research_bundle(self.search.as_ref(), context).await?;
        let raw_research_json = research.raw_results_json()?;

        let mut document = self
            .generator
            .generate(context, &raw_research_json, &request.extra_instructions)
            .await?;
        backfill_context(&mut document, context);

        let strategy_json = serde_json::to_value(&document)?;
        let strategy_markdown = render(&document);

        let save_status = match self
            .store
            .save(&research, &strategy_json, &strategy_markdown)
            .await
        {
            Ok(id) => SaveStatus::Ok { id },
            Err(e) => {
                tracing::warn!("Strategy save failed: {}", e);
                SaveStatus::Error {
                    error: e.to_string(),
                }
            }
        };

        Ok(StrategyRunOutput {
            research,
            strategy_json,
            strategy_markdown,
            save_status,
        })
    }

    /// The persistence gateway behind this pipeline
    pub fn store(&self) -> &StrategyStore {
        &self.store
    }
}

/// The model is asked to echo the product context into the document; when
/// it drops one of those fields, the known context wins over a `?`
/// placeholder in the rendered report.
fn backfill_context(document: &mut StrategyDocument, context: &ProductContext) {
    if document.product_name.trim().is_empty() {
        document.product_name = context.product_name.clone();
    }
    if document.target_users.trim().is_empty() {
        document.target_users = context.target_users.clone();
    }
    if document.goal.trim().is_empty() {
        document.goal = context.goal.clone();
    }
    if document.company_type.trim().is_empty() {
        document.company_type = context.company_type.clone();
    }
    if document.constraints.trim().is_empty() {
        document.constraints = context.constraints.clone();
    }
}
