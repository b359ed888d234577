//! Structured strategy document schema
//!
//! The generating model is instructed to produce exactly this shape, but
//! nothing guarantees it did. Every field defaults, so a partially
//! populated document is representable; the renderer fills the holes with
//! placeholders and `validate` decides whether the shape is trustworthy.

use crate::error::{Result, StrategistError};
use serde::{Deserialize, Serialize};

/// Top-level keys a generation must carry to count as a strategy document
pub const REQUIRED_KEYS: [&str; 8] = [
    "market_overview",
    "competitor_analysis",
    "user_pain_analysis",
    "market_gaps",
    "feature_ideas",
    "prioritized_features",
    "three_month_roadmap",
    "prds",
];

/// One raw feature idea before scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureIdea {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub solves_gap: String,
    #[serde(default)]
    pub solves_pain: String,
}

/// Scoring rubric for a prioritized feature. Impact, complexity and effort
/// are 1-5; `overall_priority` is a rank, unique across the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureScore {
    #[serde(default)]
    pub impact: u8,
    #[serde(default)]
    pub complexity: u8,
    #[serde(default)]
    pub effort: u8,
    #[serde(default)]
    pub overall_priority: u32,
}

/// A feature idea with its score attached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedFeature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: FeatureScore,
}

/// Three months of ordered roadmap items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub month_1: Vec<String>,
    #[serde(default)]
    pub month_2: Vec<String>,
    #[serde(default)]
    pub month_3: Vec<String>,
}

/// Product Requirement Document for one feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prd {
    #[serde(default)]
    pub feature_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_users: Vec<String>,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

/// Full structured strategy output. Context fields are echoed by the model
/// so the rendered report is self-contained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyDocument {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub target_users: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub company_type: String,
    #[serde(default)]
    pub constraints: String,

    #[serde(default)]
    pub market_overview: String,
    #[serde(default)]
    pub competitor_analysis: String,
    #[serde(default)]
    pub user_pain_analysis: String,
    #[serde(default)]
    pub market_gaps: Vec<String>,
    #[serde(default)]
    pub feature_ideas: Vec<FeatureIdea>,
    #[serde(default)]
    pub prioritized_features: Vec<PrioritizedFeature>,
    #[serde(default)]
    pub three_month_roadmap: Roadmap,
    #[serde(default)]
    pub prds: Vec<Prd>,
}

impl StrategyDocument {
    /// Check that a parsed generation carries the required top-level keys.
    pub fn check_required_keys(value: &serde_json::Value) -> Result<()> {
        let obj = value.as_object().ok_or_else(|| {
            StrategistError::SchemaViolation("Generation is not a JSON object".to_string())
        })?;

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .filter(|key| !obj.contains_key(**key))
            .copied()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StrategistError::SchemaViolation(format!(
                "Missing required keys: {}",
                missing.join(", ")
            )))
        }
    }

    /// Check that `overall_priority` values form a dense permutation of
    /// 1..=N. The prompt instructs the model to guarantee this, but the
    /// instruction is not a proof.
    pub fn check_priorities(&self) -> Result<()> {
        let n = self.prioritized_features.len() as u32;
        let mut seen = vec![false; self.prioritized_features.len()];

        for feature in &self.prioritized_features {
            let priority = feature.score.overall_priority;
            if priority < 1 || priority > n {
                return Err(StrategistError::SchemaViolation(format!(
                    "overall_priority {} out of range 1..={} for feature \"{}\"",
                    priority, n, feature.name
                )));
            }
            let slot = (priority - 1) as usize;
            if seen[slot] {
                return Err(StrategistError::SchemaViolation(format!(
                    "Duplicate overall_priority {} (feature \"{}\")",
                    priority, feature.name
                )));
            }
            seen[slot] = true;
        }

        Ok(())
    }

    /// Full shape validation: required keys plus the priority permutation.
    pub fn validate(value: &serde_json::Value) -> Result<Self> {
        Self::check_required_keys(value)?;
        let doc: StrategyDocument = serde_json::from_value(value.clone())?;
        doc.check_priorities()?;
        Ok(doc)
    }
}
