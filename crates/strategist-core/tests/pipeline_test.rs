//! End-to-end pipeline tests with mocked providers and a temp store

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strategist_core::error::{Result, StrategistError};
use strategist_core::llm::{ChatMessage, Embedder, LLMClient};
use strategist_core::research::{
    ProductContext, RawResultSet, SearchClient, SearchHit, SearchOptions,
};
use strategist_core::store::{Database, StrategyStore};
use strategist_core::strategy::StrategyGenerator;
use strategist_core::{SaveStatus, StrategyPipeline, StrategyRequest};
use tempfile::TempDir;

struct MockSearchClient {
    calls: AtomicUsize,
}

impl MockSearchClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<RawResultSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResultSet {
            query: query.to_string(),
            answer: Some("mock answer".to_string()),
            results: vec![SearchHit {
                title: "Mock result".to_string(),
                url: "https://example.com".to_string(),
                content: "mock content".to_string(),
                score: 0.9,
            }]
            .into_iter()
            .take(options.max_results)
            .collect(),
        })
    }
}

struct MockChatClient {
    response: String,
}

#[async_trait]
impl LLMClient for MockChatClient {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        Ok(self.response.clone())
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; 4])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
    }

    fn embedding_dimensions(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}

struct MockEmbedder {
    fail: bool,
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(StrategistError::Upstream(
                "embedding service down".to_string(),
            ));
        }
        // Deterministic toy embedding derived from the text length
        let len = text.len() as f32;
        Ok(vec![1.0, len % 7.0, len % 13.0, 1.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::new();
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }
}

fn canonical_strategy_json() -> String {
    serde_json::json!({
        "product_name": "Acme",
        "target_users": "product managers",
        "goal": "increase activation",
        "company_type": "mid-size B2B SaaS",
        "constraints": "",
        "market_overview": "Crowded but growing market.",
        "competitor_analysis": "Incumbents are strong on breadth, weak on onboarding.",
        "user_pain_analysis": "Setup takes too long.",
        "market_gaps": ["no self-serve onboarding"],
        "feature_ideas": [
            {"name": "Guided setup", "description": "Checklist-driven setup",
             "solves_gap": "no self-serve onboarding", "solves_pain": "setup takes too long"}
        ],
        "prioritized_features": [
            {"name": "gamma", "description": "third",
             "score": {"impact": 2, "complexity": 2, "effort": 2, "overall_priority": 3}},
            {"name": "alpha", "description": "first",
             "score": {"impact": 5, "complexity": 2, "effort": 1, "overall_priority": 1}},
            {"name": "beta", "description": "second",
             "score": {"impact": 4, "complexity": 3, "effort": 2, "overall_priority": 2}}
        ],
        "three_month_roadmap": {
            "month_1": ["ship guided setup"],
            "month_2": ["measure activation"],
            "month_3": ["iterate"]
        },
        "prds": [
            {"feature_name": "Guided setup", "description": "Checklist-driven setup",
             "target_users": ["new admins"], "motivation": "activation",
             "acceptance_criteria": ["setup completes in under 10 minutes"],
             "risks": ["checklist fatigue"]}
        ]
    })
    .to_string()
}

fn pipeline(llm_response: String, embedder_fails: bool) -> (StrategyPipeline, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("test.sqlite")).unwrap();
    db.initialize().unwrap();

    let store = StrategyStore::new(
        db,
        Arc::new(MockEmbedder {
            fail: embedder_fails,
        }),
        50,
    );
    let generator = StrategyGenerator::new(Arc::new(MockChatClient {
        response: llm_response,
    }));

    (
        StrategyPipeline::new(Arc::new(MockSearchClient::new()), generator, store),
        dir,
    )
}

fn request() -> StrategyRequest {
    StrategyRequest::new(
        ProductContext::new("Acme", "product managers", "increase activation")
            .with_constraints(""),
    )
}

#[tokio::test]
async fn test_strategy_run_end_to_end() {
    let (pipeline, _dir) = pipeline(canonical_strategy_json(), false);

    let output = pipeline.run(&request()).await.unwrap();

    // Research bundle carries all three queries and result sets
    assert_eq!(output.research.product_name, "Acme");
    assert!(output.research.queries.pains.contains("pain points"));
    assert_eq!(output.research.raw_results.trends.results.len(), 1);

    // Prioritized features render in rank order despite [3, 1, 2] input
    let markdown = &output.strategy_markdown;
    let alpha = markdown.find("### 1. alpha").unwrap();
    let beta = markdown.find("### 2. beta").unwrap();
    let gamma = markdown.find("### 3. gamma").unwrap();
    assert!(alpha < beta && beta < gamma);

    // Empty constraints render as None
    assert!(markdown.contains("- **Constraints:** None"));

    // Saved and findable again
    assert!(output.save_status.is_ok());
    assert_eq!(pipeline.store().count().unwrap(), 1);

    let matches = pipeline.store().search_similar("onboarding", 3).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].product_name, "Acme");
    assert!(matches[0].strategy_markdown.contains("Guided setup"));
}

#[tokio::test]
async fn test_get_by_id_returns_full_record() {
    let (pipeline, _dir) = pipeline(canonical_strategy_json(), false);

    let output = pipeline.run(&request()).await.unwrap();
    let id = match output.save_status {
        SaveStatus::Ok { id } => id,
        other => panic!("expected save ok, got {:?}", other),
    };

    let record = pipeline.store().get_by_id(&id).unwrap().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.product_name, "Acme");
    assert_eq!(record.strategy_markdown, output.strategy_markdown);
    assert_eq!(record.embedding_model, "mock-embed");
    assert!(record.strategy_json["prioritized_features"].is_array());

    assert!(pipeline.store().get_by_id("nope").unwrap().is_none());
}

#[tokio::test]
async fn test_persistence_failure_keeps_payload() {
    let (pipeline, _dir) = pipeline(canonical_strategy_json(), true);

    let output = pipeline.run(&request()).await.unwrap();

    assert!(!output.strategy_markdown.is_empty());
    assert!(output.strategy_json.is_object());
    match &output.save_status {
        SaveStatus::Error { error } => assert!(error.contains("embedding service down")),
        other => panic!("expected save error, got {:?}", other),
    }

    // The wire shape keeps the status discriminant as a plain string
    let value = serde_json::to_value(&output.save_status).unwrap();
    assert_eq!(value["status"], "error");

    // Nothing was written
    assert_eq!(pipeline.store().count().unwrap(), 0);
}

#[tokio::test]
async fn test_generation_wrapped_in_prose_is_repaired() {
    let wrapped = format!("Here you go:\n{}\nThanks!", canonical_strategy_json());
    let (pipeline, _dir) = pipeline(wrapped, false);

    let output = pipeline.run(&request()).await.unwrap();
    assert!(output.strategy_markdown.contains("### 1. alpha"));
}

#[tokio::test]
async fn test_generation_without_json_is_malformed() {
    let (pipeline, _dir) = pipeline("Sorry, I cannot help with that.".to_string(), false);

    let err = pipeline.run(&request()).await.unwrap_err();
    match err {
        StrategistError::MalformedGeneration { raw, .. } => {
            assert!(raw.contains("Sorry"));
        }
        other => panic!("expected MalformedGeneration, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generation_with_tied_priorities_is_schema_violation() {
    let mut value: serde_json::Value =
        serde_json::from_str(&canonical_strategy_json()).unwrap();
    value["prioritized_features"][0]["score"]["overall_priority"] = serde_json::json!(1);

    let (pipeline, _dir) = pipeline(value.to_string(), false);

    let err = pipeline.run(&request()).await.unwrap_err();
    assert!(matches!(err, StrategistError::SchemaViolation(_)));
}

#[tokio::test]
async fn test_research_only_issues_three_queries() {
    let search = Arc::new(MockSearchClient::new());
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("test.sqlite")).unwrap();
    db.initialize().unwrap();
    let store = StrategyStore::new(db, Arc::new(MockEmbedder { fail: false }), 50);
    let generator = StrategyGenerator::new(Arc::new(MockChatClient {
        response: canonical_strategy_json(),
    }));
    let pipeline = StrategyPipeline::new(search.clone(), generator, store);

    let context = ProductContext::new("Acme", "PMs", "activation");
    let bundle = pipeline.research_only(&context).await.unwrap();

    assert_eq!(search.calls.load(Ordering::SeqCst), 3);
    assert_eq!(bundle.raw_results.pains.query, bundle.queries.pains);
    assert_eq!(bundle.constraints, "");
}
