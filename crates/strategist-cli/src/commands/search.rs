//! Ad-hoc web search command

use crate::app::{OutputFormat, SearchArgs};
use anyhow::Result;
use strategist_core::StrategyPipeline;

pub async fn run(
    args: SearchArgs,
    pipeline: &StrategyPipeline,
    format: OutputFormat,
) -> Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("Search query must not be empty");
    }

    let result_set = pipeline.web_search(&query, args.max_results).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result_set)?);
        }
        OutputFormat::Cli => {
            if let Some(ref answer) = result_set.answer {
                println!("{}\n", answer);
            }
            for hit in &result_set.results {
                println!("- {} ({})", hit.title, hit.url);
            }
        }
    }

    Ok(())
}
