//! Markdown projection of a strategy document
//!
//! Pure and total: any document renders, including one with every field
//! empty. Section order is fixed; prioritized features are re-sorted here
//! because the input order is not trusted.

use super::document::{PrioritizedFeature, StrategyDocument};
use std::fmt::Write;

const NO_OVERVIEW: &str = "_No overview generated._";
const NO_COMPETITORS: &str = "_No competitor analysis generated._";
const NO_PAINS: &str = "_No pain point analysis generated._";
const NO_GAPS: &str = "_No market gaps identified._";
const NO_IDEAS: &str = "_No feature ideas generated._";
const NO_PRIORITIES: &str = "_No prioritized features generated._";
const NO_PRDS: &str = "_No PRDs generated._";
const NO_ITEMS: &str = "_None listed._";

fn field(value: &str) -> &str {
    if value.trim().is_empty() {
        "?"
    } else {
        value
    }
}

fn text_section(out: &mut String, title: &str, body: &str, placeholder: &str) {
    let _ = writeln!(out, "## {}\n", title);
    if body.trim().is_empty() {
        let _ = writeln!(out, "{}\n", placeholder);
    } else {
        let _ = writeln!(out, "{}\n", body.trim());
    }
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "{}", NO_ITEMS);
    } else {
        for item in items {
            let _ = writeln!(out, "- {}", field(item));
        }
    }
}

/// Render a strategy document to markdown. Deterministic: the same document
/// always yields byte-identical output.
pub fn render(doc: &StrategyDocument) -> String {
    let mut out = String::new();

    // Header
    let _ = writeln!(out, "# Product Strategy: {}\n", field(&doc.product_name));
    let _ = writeln!(out, "- **Target users:** {}", field(&doc.target_users));
    let _ = writeln!(out, "- **Goal:** {}", field(&doc.goal));
    let _ = writeln!(out, "- **Company type:** {}", field(&doc.company_type));
    let constraints = if doc.constraints.trim().is_empty() {
        "None"
    } else {
        doc.constraints.as_str()
    };
    let _ = writeln!(out, "- **Constraints:** {}\n", constraints);

    text_section(&mut out, "Market Overview", &doc.market_overview, NO_OVERVIEW);
    text_section(
        &mut out,
        "Competitor Analysis",
        &doc.competitor_analysis,
        NO_COMPETITORS,
    );
    text_section(
        &mut out,
        "User Pain Analysis",
        &doc.user_pain_analysis,
        NO_PAINS,
    );

    // Market gaps
    let _ = writeln!(out, "## Market Gaps\n");
    if doc.market_gaps.is_empty() {
        let _ = writeln!(out, "{}", NO_GAPS);
    } else {
        for gap in &doc.market_gaps {
            let _ = writeln!(out, "- {}", field(gap));
        }
    }
    let _ = writeln!(out);

    // Feature ideas
    let _ = writeln!(out, "## Feature Ideas\n");
    if doc.feature_ideas.is_empty() {
        let _ = writeln!(out, "{}\n", NO_IDEAS);
    } else {
        for idea in &doc.feature_ideas {
            let _ = writeln!(out, "### {}\n", field(&idea.name));
            let _ = writeln!(out, "{}\n", field(&idea.description));
            let _ = writeln!(out, "- Solves gap: {}", field(&idea.solves_gap));
            let _ = writeln!(out, "- Solves pain: {}\n", field(&idea.solves_pain));
        }
    }

    // Prioritized features, ascending by rank whatever the input order
    let _ = writeln!(out, "## Prioritized Features\n");
    if doc.prioritized_features.is_empty() {
        let _ = writeln!(out, "{}\n", NO_PRIORITIES);
    } else {
        let mut ranked: Vec<&PrioritizedFeature> = doc.prioritized_features.iter().collect();
        ranked.sort_by_key(|f| f.score.overall_priority);
        for feature in ranked {
            let _ = writeln!(
                out,
                "### {}. {}\n",
                feature.score.overall_priority,
                field(&feature.name)
            );
            let _ = writeln!(out, "{}\n", field(&feature.description));
            let _ = writeln!(
                out,
                "- Impact: {}/5, Complexity: {}/5, Effort: {}/5\n",
                feature.score.impact, feature.score.complexity, feature.score.effort
            );
        }
    }

    // Roadmap
    let _ = writeln!(out, "## 3-Month Roadmap\n");
    for (label, items) in [
        ("Month 1", &doc.three_month_roadmap.month_1),
        ("Month 2", &doc.three_month_roadmap.month_2),
        ("Month 3", &doc.three_month_roadmap.month_3),
    ] {
        let _ = writeln!(out, "### {}\n", label);
        bullets(&mut out, items);
        let _ = writeln!(out);
    }

    // PRDs
    let _ = writeln!(out, "## PRDs\n");
    if doc.prds.is_empty() {
        let _ = writeln!(out, "{}", NO_PRDS);
    } else {
        for prd in &doc.prds {
            let _ = writeln!(out, "### PRD: {}\n", field(&prd.feature_name));
            let _ = writeln!(out, "{}\n", field(&prd.description));
            let target_users = if prd.target_users.is_empty() {
                "?".to_string()
            } else {
                prd.target_users.join(", ")
            };
            let _ = writeln!(out, "- **Target users:** {}", target_users);
            let _ = writeln!(out, "- **Motivation:** {}\n", field(&prd.motivation));
            let _ = writeln!(out, "**Acceptance criteria:**\n");
            bullets(&mut out, &prd.acceptance_criteria);
            let _ = writeln!(out, "\n**Risks:**\n");
            bullets(&mut out, &prd.risks);
            let _ = writeln!(out);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::document::{FeatureScore, Prd, PrioritizedFeature};

    #[test]
    fn test_empty_document_renders_placeholders() {
        let markdown = render(&StrategyDocument::default());

        assert!(!markdown.is_empty());
        assert!(markdown.contains(NO_OVERVIEW));
        assert!(markdown.contains(NO_COMPETITORS));
        assert!(markdown.contains(NO_PAINS));
        assert!(markdown.contains(NO_GAPS));
        assert!(markdown.contains(NO_IDEAS));
        assert!(markdown.contains(NO_PRIORITIES));
        assert!(markdown.contains(NO_PRDS));
        assert!(markdown.contains("# Product Strategy: ?"));
    }

    #[test]
    fn test_empty_constraints_render_none() {
        let doc = StrategyDocument {
            constraints: String::new(),
            ..Default::default()
        };
        assert!(render(&doc).contains("- **Constraints:** None"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = StrategyDocument {
            product_name: "Acme".to_string(),
            market_overview: "Busy market.".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_prioritized_features_sorted_by_rank() {
        let feature = |name: &str, priority: u32| PrioritizedFeature {
            name: name.to_string(),
            description: "d".to_string(),
            score: FeatureScore {
                impact: 4,
                complexity: 2,
                effort: 2,
                overall_priority: priority,
            },
        };

        let doc = StrategyDocument {
            prioritized_features: vec![
                feature("gamma", 3),
                feature("alpha", 1),
                feature("beta", 2),
            ],
            ..Default::default()
        };

        let markdown = render(&doc);
        let alpha = markdown.find("### 1. alpha").unwrap();
        let beta = markdown.find("### 2. beta").unwrap();
        let gamma = markdown.find("### 3. gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn test_prd_missing_fields_render_placeholders() {
        let doc = StrategyDocument {
            prds: vec![Prd {
                feature_name: "Guided setup".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let markdown = render(&doc);
        assert!(markdown.contains("### PRD: Guided setup"));
        assert!(markdown.contains("- **Target users:** ?"));
        assert!(markdown.contains(NO_ITEMS));
    }
}
