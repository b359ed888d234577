//! Similarity search over saved strategies

use crate::app::{OutputFormat, RecallArgs};
use anyhow::Result;
use strategist_core::StrategyStore;

pub async fn run(args: RecallArgs, store: &StrategyStore, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("Recall query must not be empty");
    }

    let matches = store.search_similar(&query, args.top_k).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        OutputFormat::Cli => {
            if matches.is_empty() {
                println!("No similar strategies found.");
                return Ok(());
            }
            for (idx, m) in matches.iter().enumerate() {
                println!(
                    "{}. {} (score: {:.3})",
                    idx + 1,
                    m.product_name,
                    m.score
                );
                if let Some(first_line) = m.strategy_markdown.lines().next() {
                    println!("   {}", first_line);
                }
            }
        }
    }

    Ok(())
}
