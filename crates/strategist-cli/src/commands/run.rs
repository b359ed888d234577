//! Full pipeline command

use crate::app::{OutputFormat, RunArgs};
use anyhow::Result;
use strategist_core::{
    ProductContext, SaveStatus, StrategyPipeline, StrategyRequest,
};

pub async fn run(
    args: RunArgs,
    pipeline: &StrategyPipeline,
    format: OutputFormat,
) -> Result<()> {
    let context = ProductContext::new(args.product, args.users, args.goal)
        .with_company_type(args.company_type.unwrap_or_default())
        .with_constraints(args.constraints.unwrap_or_default());

    let request = StrategyRequest::new(context)
        .with_extra_instructions(args.extra.unwrap_or_default());

    let output = pipeline.run(&request).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Cli => {
            println!("{}", output.strategy_markdown);
            match &output.save_status {
                SaveStatus::Ok { id } => println!("Saved as {}", id),
                SaveStatus::Error { error } => {
                    eprintln!("Warning: strategy not saved: {}", error)
                }
                SaveStatus::Skipped => eprintln!("Save skipped"),
            }
        }
    }

    Ok(())
}
