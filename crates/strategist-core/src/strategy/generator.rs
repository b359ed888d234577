//! Strategy generation over an external LLM service

use super::document::StrategyDocument;
use super::prompt::{build_strategy_prompt, SYSTEM_PROMPT};
use crate::config::LLMServiceConfig;
use crate::error::{Result, StrategistError};
use crate::llm::{ChatMessage, LLMClient, OpenAIClient};
use crate::research::ProductContext;
use std::sync::Arc;

/// Generates structured strategy documents from product context + research
pub struct StrategyGenerator {
    client: Arc<dyn LLMClient>,
}

impl StrategyGenerator {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let client = OpenAIClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let client = OpenAIClient::from_env()?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Generate a strategy document.
    ///
    /// The model is instructed to respond with strict JSON and no prose;
    /// the tolerant parse below is the safety net for when it does not.
    pub async fn generate(
        &self,
        context: &ProductContext,
        raw_research_json: &str,
        extra_instructions: &str,
    ) -> Result<StrategyDocument> {
        let prompt = build_strategy_prompt(context, raw_research_json, extra_instructions);

        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        tracing::info!(
            "Generating strategy for \"{}\" via {}",
            context.product_name,
            self.client.model_name()
        );

        let response = self.client.chat_completion(messages).await?;

        let value = parse_strategy_response(&response)?;
        StrategyDocument::validate(&value)
    }

    /// Model name of the underlying client
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

/// Two-stage tolerant parse of an LLM response.
///
/// 1. Direct JSON parse of the full text.
/// 2. On failure, the substring from the first `{` to the last `}`.
///
/// The fallback is a heuristic, not a parser: it handles the common case of
/// valid JSON wrapped in commentary and still fails on unbalanced braces or
/// multiple JSON blocks. Both failing is terminal for the run.
pub fn parse_strategy_response(response: &str) -> Result<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(response) {
        return Ok(value);
    }

    let start = response.find('{');
    let end = response.rfind('}');

    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&response[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(StrategistError::malformed_generation(
        "LLM response is not JSON, even after brace extraction",
        response,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_json() {
        let value = parse_strategy_response(r#"{"market_overview": "x"}"#).unwrap();
        assert_eq!(value["market_overview"], "x");
    }

    #[test]
    fn test_parse_repairs_wrapped_json() {
        let response = "Here you go:\n{\"market_overview\": \"x\"}\nThanks!";
        let value = parse_strategy_response(response).unwrap();
        assert_eq!(value["market_overview"], "x");
    }

    #[test]
    fn test_parse_fails_without_braces() {
        let err = parse_strategy_response("no json here").unwrap_err();
        match err {
            StrategistError::MalformedGeneration { raw, .. } => {
                assert_eq!(raw, "no json here");
            }
            other => panic!("expected MalformedGeneration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fails_on_unbalanced_braces() {
        assert!(parse_strategy_response("oops {\"a\": 1").is_err());
    }
}
