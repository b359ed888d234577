//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "strategist")]
#[command(
    author,
    version,
    about = "AI product strategist: web research, strategy generation and vector memory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full strategy pipeline (research, generate, render, save)
    Run(RunArgs),

    /// Run only the research bundle
    Research(ResearchArgs),

    /// Ad-hoc web search
    Search(SearchArgs),

    /// Similarity search over saved strategies
    Recall(RecallArgs),

    /// Show one saved strategy by id
    Show(ShowArgs),

    /// Show vector memory status
    Status,

    /// Start MCP server
    Mcp,
}

#[derive(Args)]
pub struct RunArgs {
    /// Product name or short description
    #[arg(long)]
    pub product: String,

    /// Target users
    #[arg(long)]
    pub users: String,

    /// Primary goal
    #[arg(long)]
    pub goal: String,

    /// Company framing
    #[arg(long)]
    pub company_type: Option<String>,

    /// Team/time/budget constraints
    #[arg(long)]
    pub constraints: Option<String>,

    /// Extra steering for the generator
    #[arg(long)]
    pub extra: Option<String>,
}

#[derive(Args)]
pub struct ResearchArgs {
    /// Product name or short description
    #[arg(long)]
    pub product: String,

    /// Target users
    #[arg(long)]
    pub users: String,

    /// Primary goal
    #[arg(long)]
    pub goal: String,

    /// Company framing
    #[arg(long)]
    pub company_type: Option<String>,

    /// Team/time/budget constraints
    #[arg(long)]
    pub constraints: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Vec<String>,

    /// Result cap
    #[arg(long, default_value = "5")]
    pub max_results: usize,
}

#[derive(Args)]
pub struct RecallArgs {
    /// Natural language description of the strategy to find
    pub query: Vec<String>,

    /// Number of matches
    #[arg(long, default_value = "3")]
    pub top_k: usize,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Record id as printed by `run`
    pub id: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Cli,
    /// JSON payloads
    Json,
}
