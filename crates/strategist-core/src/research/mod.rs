//! Market research over a web search provider
//!
//! Three fixed query templates (pains, competitors, trends) are derived from
//! the product context by string substitution and issued against the search
//! client. The queries are independent, so they fan out concurrently and
//! join before the bundle is returned.

mod tavily;

pub use tavily::{RawResultSet, SearchClient, SearchHit, SearchOptions, TavilyClient};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Default company framing used when the caller does not supply one
pub const DEFAULT_COMPANY_TYPE: &str = "mid-size B2B SaaS";

/// Product context for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductContext {
    pub product_name: String,
    pub target_users: String,
    pub goal: String,
    #[serde(default = "default_company_type")]
    pub company_type: String,
    #[serde(default)]
    pub constraints: String,
}

fn default_company_type() -> String {
    DEFAULT_COMPANY_TYPE.to_string()
}

impl ProductContext {
    pub fn new(
        product_name: impl Into<String>,
        target_users: impl Into<String>,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            target_users: target_users.into(),
            goal: goal.into(),
            company_type: default_company_type(),
            constraints: String::new(),
        }
    }

    pub fn with_company_type(mut self, company_type: impl Into<String>) -> Self {
        let company_type = company_type.into();
        if !company_type.trim().is_empty() {
            self.company_type = company_type;
        }
        self
    }

    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }
}

/// The three queries issued for one bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQueries {
    pub pains: String,
    pub competitors: String,
    pub trends: String,
}

/// The three raw provider result sets for one bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchResults {
    pub pains: RawResultSet,
    pub competitors: RawResultSet,
    pub trends: RawResultSet,
}

/// Product context plus raw search results for one pipeline run.
/// Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchBundle {
    pub product_name: String,
    pub target_users: String,
    pub goal: String,
    pub company_type: String,
    pub constraints: String,
    pub queries: ResearchQueries,
    pub raw_results: ResearchResults,
}

impl ResearchBundle {
    /// JSON serialization of the three raw result sets, as handed to the
    /// prompt template.
    pub fn raw_results_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.raw_results)?)
    }
}

pub fn pains_query(context: &ProductContext) -> String {
    format!(
        "Top pain points and unmet needs for {} working on or using {} in {} context",
        context.target_users, context.product_name, context.company_type
    )
}

pub fn competitors_query(context: &ProductContext) -> String {
    format!(
        "Key tools, platforms or competitors solving similar problems to {} for {} in a {} context",
        context.product_name, context.target_users, context.company_type
    )
}

pub fn trends_query(context: &ProductContext) -> String {
    format!(
        "Recent trends, opportunities and risks in PM tooling / SaaS related to {} for {} in {}",
        context.product_name, context.target_users, context.company_type
    )
}

/// Run the three research queries and assemble a bundle.
///
/// The queries fan out concurrently; the first provider failure aborts the
/// bundle (no retries).
pub async fn build_research_bundle(
    client: &dyn SearchClient,
    context: &ProductContext,
) -> Result<ResearchBundle> {
    let options = SearchOptions::default();

    let queries = ResearchQueries {
        pains: pains_query(context),
        competitors: competitors_query(context),
        trends: trends_query(context),
    };

    tracing::info!("Running research bundle for \"{}\"", context.product_name);

    let (pains, competitors, trends) = futures::try_join!(
        client.search(&queries.pains, &options),
        client.search(&queries.competitors, &options),
        client.search(&queries.trends, &options),
    )?;

    Ok(ResearchBundle {
        product_name: context.product_name.clone(),
        target_users: context.target_users.clone(),
        goal: context.goal.clone(),
        company_type: context.company_type.clone(),
        constraints: context.constraints.clone(),
        queries,
        raw_results: ResearchResults {
            pains,
            competitors,
            trends,
        },
    })
}
