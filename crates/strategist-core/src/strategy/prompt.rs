//! Prompt assembly for strategy generation
//!
//! Pure functions only. The research JSON is embedded via the serializer
//! output handed in by the caller, never by hand-built string fragments, so
//! the instruction block stays structurally valid.

use crate::research::ProductContext;

/// Persona carried as the system message on every generation call
pub const SYSTEM_PROMPT: &str = "\
You are a senior AI Product Strategist for tech products.

You turn raw market research into clear, actionable product strategy:
concise summaries, explicit competitor comparisons, opportunity gaps, and
concrete feature and roadmap suggestions.

ALWAYS:
- keep output structured exactly as requested
- avoid hallucinating numbers; if unknown, say what you would research next
- be concise, practical and specific to the given company context";

/// Build the user prompt for one generation.
///
/// Pins the exact output field names and nesting, the scoring rubric and
/// the roadmap section labels the parser and renderer rely on.
pub fn build_strategy_prompt(
    context: &ProductContext,
    raw_research_json: &str,
    extra_instructions: &str,
) -> String {
    let constraints = if context.constraints.trim().is_empty() {
        "none specified"
    } else {
        context.constraints.as_str()
    };

    let extra = if extra_instructions.trim().is_empty() {
        String::new()
    } else {
        format!("\nAdditional instructions: {}\n", extra_instructions)
    };

    format!(
        r#"You are helping define the strategy for a product with the following context:

- Product: {product}
- Target users: {users}
- Company type: {company}
- Goal: {goal}
- Constraints: {constraints}
{extra}
You are given web research (JSON) with pains, competitors and trends:

{research}

Using this, produce a full strategy document and output ONLY valid JSON with
these exact fields:

{{
  "product_name": "echo of the product name",
  "target_users": "echo of the target users",
  "goal": "echo of the goal",
  "company_type": "echo of the company type",
  "constraints": "echo of the constraints",
  "market_overview": "2-3 paragraph market overview",
  "competitor_analysis": "what competitors do well and badly",
  "user_pain_analysis": "pain points and unmet needs",
  "market_gaps": ["gap 1", "gap 2"],
  "feature_ideas": [
    {{"name": "...", "description": "...", "solves_gap": "...", "solves_pain": "..."}}
  ],
  "prioritized_features": [
    {{"name": "...", "description": "...",
      "score": {{"impact": 1, "complexity": 1, "effort": 1, "overall_priority": 1}}}}
  ],
  "three_month_roadmap": {{
    "month_1": ["item"], "month_2": ["item"], "month_3": ["item"]
  }},
  "prds": [
    {{"feature_name": "...", "description": "...", "target_users": ["..."],
      "motivation": "...", "acceptance_criteria": ["..."], "risks": ["..."]}}
  ]
}}

Scoring rubric:
- impact, complexity and effort are integers from 1 (lowest) to 5 (highest)
- overall_priority ranks the features 1..N with NO ties: every feature gets
  a distinct rank and rank 1 is the single highest priority
- write PRDs only for the top-ranked features (at most 3)

Respond with the JSON object only. No prose before or after it."#,
        product = context.product_name,
        users = context.target_users,
        company = context.company_type,
        goal = context.goal,
        constraints = constraints,
        extra = extra,
        research = raw_research_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_context_and_research() {
        let context = ProductContext::new("Acme", "PMs", "activation");
        let research = r#"{"pains": {"query": "q", "results": []}}"#;

        let prompt = build_strategy_prompt(&context, research, "");
        assert!(prompt.contains("- Product: Acme"));
        assert!(prompt.contains(research));
        assert!(prompt.contains("\"overall_priority\": 1"));
        assert!(prompt.contains("Constraints: none specified"));
        assert!(!prompt.contains("Additional instructions"));
    }

    #[test]
    fn test_prompt_includes_extra_instructions() {
        let context = ProductContext::new("Acme", "PMs", "activation")
            .with_constraints("3 devs, 3 months");

        let prompt = build_strategy_prompt(&context, "{}", "favor low-effort features");
        assert!(prompt.contains("Constraints: 3 devs, 3 months"));
        assert!(prompt.contains("Additional instructions: favor low-effort features"));
    }
}
