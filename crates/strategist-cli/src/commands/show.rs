//! Show one saved strategy by id

use crate::app::{OutputFormat, ShowArgs};
use anyhow::Result;
use strategist_core::StrategyStore;

pub async fn run(args: ShowArgs, store: &StrategyStore, format: OutputFormat) -> Result<()> {
    let record = store
        .get_by_id(&args.id)?
        .ok_or_else(|| anyhow::anyhow!("Strategy not found: {}", args.id))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Cli => {
            println!(
                "{} — {} (saved {})\n",
                record.id, record.product_name, record.created_at
            );
            println!("{}", record.strategy_markdown);
        }
    }

    Ok(())
}
