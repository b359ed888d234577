//! MCP tool definitions and handlers

use crate::protocol::*;
use anyhow::Result;
use serde_json::Value;
use strategist_core::{ProductContext, StrategyPipeline, StrategyRequest, DEFAULT_TOP_K};

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing {}", key))
}

fn optional_str(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn product_context(args: &Value) -> Result<ProductContext> {
    let context = ProductContext::new(
        required_str(args, "product_name")?,
        required_str(args, "target_users")?,
        required_str(args, "goal")?,
    )
    .with_company_type(optional_str(args, "company_type"))
    .with_constraints(optional_str(args, "constraints"));

    Ok(context)
}

pub fn strategy_run_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "strategy_run".to_string(),
        description: "End-to-end strategy workflow: web research (pains, competitors, trends), \
                      LLM strategy generation, markdown rendering, and save to vector memory"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "product_name": {
                    "type": "string",
                    "description": "Name or short description of the product"
                },
                "target_users": {
                    "type": "string",
                    "description": "Who the product is for"
                },
                "goal": {
                    "type": "string",
                    "description": "Primary goal the strategy should serve"
                },
                "company_type": {
                    "type": "string",
                    "description": "Company framing (default: mid-size B2B SaaS)"
                },
                "constraints": {
                    "type": "string",
                    "description": "Team/time/budget constraints"
                },
                "extra_instructions": {
                    "type": "string",
                    "description": "Optional steering for the generator"
                }
            },
            "required": ["product_name", "target_users", "goal"]
        }),
    }
}

pub fn research_only_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "research_only".to_string(),
        description: "Run only the web research bundle (pains, competitors, trends) without \
                      generating a strategy"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "product_name": {
                    "type": "string",
                    "description": "Name or short description of the product"
                },
                "target_users": {
                    "type": "string",
                    "description": "Who the product is for"
                },
                "goal": {
                    "type": "string",
                    "description": "Primary goal the research should serve"
                },
                "company_type": {
                    "type": "string",
                    "description": "Company framing (default: mid-size B2B SaaS)"
                },
                "constraints": {
                    "type": "string",
                    "description": "Team/time/budget constraints"
                }
            },
            "required": ["product_name", "target_users", "goal"]
        }),
    }
}

pub fn web_search_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "web_search".to_string(),
        description: "Generic web search via the configured search provider".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Result cap (default: 5)",
                    "default": 5
                }
            },
            "required": ["query"]
        }),
    }
}

pub fn memory_search_similar_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "memory_search_similar".to_string(),
        description: "Semantic search over previously saved strategies using vector similarity"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Natural language description of the strategy to find"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Number of matches (default: 3)",
                    "default": 3
                }
            },
            "required": ["query"]
        }),
    }
}

pub fn memory_get_by_id_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "memory_get_by_id".to_string(),
        description: "Fetch one saved strategy record by its id".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Record id as returned by strategy_run"
                }
            },
            "required": ["id"]
        }),
    }
}

pub fn status_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "status".to_string(),
        description: "Show vector memory status".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub async fn handle_strategy_run(pipeline: &StrategyPipeline, args: Value) -> Result<ToolResult> {
    let request = StrategyRequest::new(product_context(&args)?)
        .with_extra_instructions(optional_str(&args, "extra_instructions"));

    let output = pipeline.run(&request).await?;

    let summary = format!(
        "Generated strategy for \"{}\" (save: {})",
        output.research.product_name,
        if output.save_status.is_ok() {
            "ok"
        } else {
            "failed"
        }
    );

    Ok(ToolResult::with_payload(
        summary,
        serde_json::to_value(&output)?,
    ))
}

pub async fn handle_research_only(pipeline: &StrategyPipeline, args: Value) -> Result<ToolResult> {
    let context = product_context(&args)?;
    let bundle = pipeline.research_only(&context).await?;

    let total_results = bundle.raw_results.pains.results.len()
        + bundle.raw_results.competitors.results.len()
        + bundle.raw_results.trends.results.len();

    let summary = format!(
        "Research bundle for \"{}\": {} results across 3 queries",
        bundle.product_name, total_results
    );

    Ok(ToolResult::with_payload(
        summary,
        serde_json::to_value(&bundle)?,
    ))
}

pub async fn handle_web_search(pipeline: &StrategyPipeline, args: Value) -> Result<ToolResult> {
    let query = required_str(&args, "query")?;
    let max_results = args
        .get("max_results")
        .and_then(|v| v.as_u64())
        .unwrap_or(5) as usize;

    let result_set = pipeline.web_search(query, max_results).await?;

    let summary = format!(
        "Found {} results for \"{}\"",
        result_set.results.len(),
        query
    );

    Ok(ToolResult::with_payload(
        summary,
        serde_json::to_value(&result_set)?,
    ))
}

pub async fn handle_memory_search_similar(
    pipeline: &StrategyPipeline,
    args: Value,
) -> Result<ToolResult> {
    let query = required_str(&args, "query")?;
    let top_k = args
        .get("top_k")
        .and_then(|v| v.as_u64())
        .unwrap_or(DEFAULT_TOP_K as u64) as usize;

    let matches = pipeline.store().search_similar(query, top_k).await?;

    let summary = format!("Found {} similar strategies for \"{}\"", matches.len(), query);
    let structured: Vec<Value> = matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "product_name": m.product_name,
                "score": (m.score as f64 * 1000.0).round() / 1000.0,
                "strategy_markdown": m.strategy_markdown
            })
        })
        .collect();

    Ok(ToolResult::with_payload(
        summary,
        serde_json::json!({ "results": structured }),
    ))
}

pub async fn handle_memory_get_by_id(
    pipeline: &StrategyPipeline,
    args: Value,
) -> Result<ToolResult> {
    let id = required_str(&args, "id")?;

    let record = pipeline
        .store()
        .get_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Strategy not found: {}", id))?;

    let summary = format!(
        "Strategy {} ({}, saved {})",
        record.id, record.product_name, record.created_at
    );

    Ok(ToolResult::with_payload(
        summary,
        serde_json::to_value(&record)?,
    ))
}

pub async fn handle_status(pipeline: &StrategyPipeline) -> Result<ToolResult> {
    let count = pipeline.store().count()?;
    let model = pipeline.store().embedding_model();

    let summary = format!(
        "Vector memory: {} strategies stored\nEmbedding model: {}",
        count, model
    );

    Ok(ToolResult::with_payload(
        summary,
        serde_json::json!({
            "strategies": count,
            "embeddingModel": model
        }),
    ))
}
