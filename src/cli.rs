use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::store::SolutionKind;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,         // global --quiet
    pub no_color: bool,      // global --no-color
    pub db: Option<PathBuf>, // global --db override
}

#[derive(Parser)]
#[command(name = "ordo")]
#[command(
    about = "Rank algorithmic solutions by asymptotic complexity and keep per-problem bookkeeping"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Order two Big-O complexity expressions
    Compare(CompareArgs),

    /// Rank two solutions by (time, then space) complexity
    Rank(RankArgs),

    /// Create, inspect, or remove problems
    #[command(subcommand)]
    Problem(ProblemCommand),

    /// Designate the canonical reference solution for a problem
    Reference(ReferenceArgs),

    /// Submit or refresh a candidate solution
    Candidate(CandidateArgs),

    /// Show recorded comparisons for a problem
    History(HistoryArgs),

    /// Initialize an ordo.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct CompareArgs {
    /// First Big-O expression (e.g. "O(n log n)")
    pub a: String,

    /// Second Big-O expression
    pub b: String,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct RankArgs {
    /// First solution's time complexity
    pub time_a: String,

    /// First solution's space complexity
    pub space_a: String,

    /// Second solution's time complexity
    pub time_b: String,

    /// Second solution's space complexity
    pub space_b: String,

    /// Persist the outcome as a comparison record for this problem
    #[arg(long, value_name = "PROBLEM_ID")]
    pub record: Option<i64>,

    /// Stored solution id for the first side (required with --record)
    #[arg(long, value_name = "SOLUTION_ID")]
    pub first: Option<i64>,

    /// Stored solution id for the second side (required with --record)
    #[arg(long, value_name = "SOLUTION_ID")]
    pub second: Option<i64>,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ProblemCommand {
    /// Upsert a problem statement (exact hash, fuzzy match, or insert)
    Upsert(ProblemUpsertArgs),

    /// Show one problem and its solutions
    Show(ProblemShowArgs),

    /// List all problems
    List(ProblemListArgs),

    /// Delete a problem and its solutions
    Delete(ProblemDeleteArgs),
}

#[derive(Parser)]
pub struct ProblemUpsertArgs {
    /// The problem statement text
    pub statement: String,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ProblemShowArgs {
    /// Problem id
    pub id: i64,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ProblemListArgs {
    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ProblemDeleteArgs {
    /// Problem id
    pub id: i64,
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Problem id
    pub problem: i64,

    /// Solution representation
    #[arg(long, value_enum, default_value = "pseudocode")]
    pub kind: SolutionKindArg,

    /// Solution content (clipped for storage)
    #[arg(long)]
    pub content: String,

    /// Canonical CFG payload: inline JSON or @path/to/file.json
    #[arg(long)]
    pub cfg: Option<String>,

    /// Optimal time complexity (e.g. "O(n)")
    #[arg(long)]
    pub time: String,

    /// Optimal space complexity (e.g. "O(1)")
    #[arg(long)]
    pub space: String,

    /// Problem category label
    #[arg(long)]
    pub category: Option<String>,

    /// Submitter identity
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Parser)]
pub struct CandidateArgs {
    /// Problem id
    pub problem: i64,

    /// Submitter identity
    #[arg(long)]
    pub owner: String,

    /// Solution representation
    #[arg(long, value_enum, default_value = "pseudocode")]
    pub kind: SolutionKindArg,

    /// Solution content (clipped for storage)
    #[arg(long)]
    pub content: String,

    /// CFG payload: inline JSON or @path/to/file.json
    #[arg(long)]
    pub cfg: Option<String>,

    /// Evaluation score from the upstream scoring step
    #[arg(long)]
    pub score: i64,

    /// Evaluation detail payload: inline JSON or @path/to/file.json
    #[arg(long)]
    pub eval: Option<String>,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Problem id
    pub problem: i64,

    /// Maximum records to show, newest first
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to place the config file in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the completion file into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Emit the completion script to stdout instead
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// CLI-facing solution representation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SolutionKindArg {
    Flowchart,
    Pseudocode,
}

/// Conversion from the CLI-layer enum to the store's
impl From<SolutionKindArg> for SolutionKind {
    fn from(kind: SolutionKindArg) -> Self {
        match kind {
            SolutionKindArg::Flowchart => SolutionKind::Flowchart,
            SolutionKindArg::Pseudocode => SolutionKind::Pseudocode,
        }
    }
}
