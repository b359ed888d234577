//! Integration tests for MCP tools against a mocked pipeline

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use strategist_core::error::Result;
use strategist_core::llm::{ChatMessage, Embedder, LLMClient};
use strategist_core::research::{RawResultSet, SearchClient, SearchHit, SearchOptions};
use strategist_core::store::{Database, StrategyStore};
use strategist_core::strategy::StrategyGenerator;
use strategist_core::StrategyPipeline;
use strategist_mcp::tools::*;
use tempfile::TempDir;

struct StubSearchClient;

#[async_trait]
impl SearchClient for StubSearchClient {
    async fn search(&self, query: &str, _options: &SearchOptions) -> Result<RawResultSet> {
        Ok(RawResultSet {
            query: query.to_string(),
            answer: None,
            results: vec![SearchHit {
                title: "hit".to_string(),
                url: "https://example.com".to_string(),
                content: "content".to_string(),
                score: 0.5,
            }],
        })
    }
}

struct StubChatClient;

#[async_trait]
impl LLMClient for StubChatClient {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        Ok(json!({
            "product_name": "Acme",
            "target_users": "PMs",
            "goal": "activation",
            "company_type": "mid-size B2B SaaS",
            "constraints": "",
            "market_overview": "Overview.",
            "competitor_analysis": "Competitors.",
            "user_pain_analysis": "Pains.",
            "market_gaps": ["gap"],
            "feature_ideas": [],
            "prioritized_features": [
                {"name": "one", "description": "d",
                 "score": {"impact": 4, "complexity": 2, "effort": 2, "overall_priority": 1}}
            ],
            "three_month_roadmap": {"month_1": [], "month_2": [], "month_3": []},
            "prds": []
        })
        .to_string())
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn embedding_dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "stub-chat"
    }
}

struct StubEmbedder;

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "stub-embed"
    }
}

fn test_pipeline() -> (StrategyPipeline, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("test.sqlite")).unwrap();
    db.initialize().unwrap();

    let store = StrategyStore::new(db, Arc::new(StubEmbedder), 50);
    let generator = StrategyGenerator::new(Arc::new(StubChatClient));

    (
        StrategyPipeline::new(Arc::new(StubSearchClient), generator, store),
        dir,
    )
}

#[tokio::test]
async fn test_strategy_run_tool_returns_full_payload() {
    let (pipeline, _dir) = test_pipeline();

    let args = json!({
        "product_name": "Acme",
        "target_users": "PMs",
        "goal": "activation"
    });

    let result = handle_strategy_run(&pipeline, args).await.unwrap();
    assert!(!result.is_error.unwrap_or(false));

    let payload = result.structured_content.unwrap();
    assert_eq!(payload["product_name"], "Acme");
    assert!(payload["strategy_json"]["prioritized_features"].is_array());
    assert!(payload["strategy_markdown"]
        .as_str()
        .unwrap()
        .contains("# Product Strategy: Acme"));
    assert_eq!(payload["save_status"]["status"], "ok");
}

#[tokio::test]
async fn test_strategy_run_tool_requires_inputs() {
    let (pipeline, _dir) = test_pipeline();

    let err = handle_strategy_run(&pipeline, json!({"product_name": "Acme"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("target_users"));
}

#[tokio::test]
async fn test_research_only_tool_returns_bundle() {
    let (pipeline, _dir) = test_pipeline();

    let args = json!({
        "product_name": "Acme",
        "target_users": "PMs",
        "goal": "activation",
        "company_type": "startup"
    });

    let result = handle_research_only(&pipeline, args).await.unwrap();
    let payload = result.structured_content.unwrap();

    assert_eq!(payload["company_type"], "startup");
    assert!(payload["queries"]["pains"].as_str().unwrap().contains("Acme"));
    assert!(payload["raw_results"]["trends"]["results"].is_array());
    // Research-only payloads never carry a generated strategy
    assert!(payload.get("strategy_markdown").is_none());
}

#[tokio::test]
async fn test_memory_tools_round_trip() {
    let (pipeline, _dir) = test_pipeline();

    let args = json!({
        "product_name": "Acme",
        "target_users": "PMs",
        "goal": "activation"
    });
    let run_result = handle_strategy_run(&pipeline, args).await.unwrap();
    let payload = run_result.structured_content.unwrap();
    let id = payload["save_status"]["id"].as_str().unwrap().to_string();

    // Similar search projects only the public fields
    let search_result =
        handle_memory_search_similar(&pipeline, json!({"query": "activation", "top_k": 3}))
            .await
            .unwrap();
    let matches = search_result.structured_content.unwrap();
    let first = &matches["results"][0];
    assert_eq!(first["product_name"], "Acme");
    assert!(first["score"].is_number());
    assert!(first.get("id").is_none());

    // By-id lookup returns the full record
    let get_result = handle_memory_get_by_id(&pipeline, json!({"id": id}))
        .await
        .unwrap();
    let record = get_result.structured_content.unwrap();
    assert_eq!(record["id"], payload["save_status"]["id"]);
    assert_eq!(record["embedding_model"], "stub-embed");
}

#[tokio::test]
async fn test_memory_get_by_id_unknown_id_errors() {
    let (pipeline, _dir) = test_pipeline();

    let err = handle_memory_get_by_id(&pipeline, json!({"id": "does-not-exist"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_status_tool_reports_counts() {
    let (pipeline, _dir) = test_pipeline();

    let result = handle_status(&pipeline).await.unwrap();
    let payload = result.structured_content.unwrap();
    assert_eq!(payload["strategies"], 0);
    assert_eq!(payload["embeddingModel"], "stub-embed");
}
