//! Vector memory status

use crate::app::OutputFormat;
use anyhow::Result;
use strategist_core::StrategyStore;

pub async fn run(store: &StrategyStore, format: OutputFormat) -> Result<()> {
    let count = store.count()?;
    let model = store.embedding_model();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "strategies": count,
                    "embeddingModel": model
                }))?
            );
        }
        OutputFormat::Cli => {
            println!("Strategies stored: {}", count);
            println!("Embedding model:   {}", model);
        }
    }

    Ok(())
}
