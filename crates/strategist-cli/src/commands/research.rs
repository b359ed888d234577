//! Research-only command

use crate::app::{OutputFormat, ResearchArgs};
use anyhow::Result;
use strategist_core::{ProductContext, RawResultSet, StrategyPipeline};

pub async fn run(
    args: ResearchArgs,
    pipeline: &StrategyPipeline,
    format: OutputFormat,
) -> Result<()> {
    let context = ProductContext::new(args.product, args.users, args.goal)
        .with_company_type(args.company_type.unwrap_or_default())
        .with_constraints(args.constraints.unwrap_or_default());

    let bundle = pipeline.research_only(&context).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        OutputFormat::Cli => {
            println!("Research bundle for \"{}\"\n", bundle.product_name);
            print_result_set("Pains", &bundle.raw_results.pains);
            print_result_set("Competitors", &bundle.raw_results.competitors);
            print_result_set("Trends", &bundle.raw_results.trends);
        }
    }

    Ok(())
}

fn print_result_set(label: &str, set: &RawResultSet) {
    println!("{}: {}", label, set.query);
    if let Some(ref answer) = set.answer {
        println!("  Answer: {}", answer);
    }
    for hit in &set.results {
        println!("  - {} ({})", hit.title, hit.url);
    }
    println!();
}
