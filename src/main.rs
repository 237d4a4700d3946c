use anyhow::Result;
use clap::Parser;
use ordo::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG-driven logging; silent by default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        db: cli.db.clone(),
    };

    match cli.command {
        Commands::Compare(args) => ordo::cli_ext::commands::compare_run(args, &ctx),
        Commands::Rank(args) => ordo::cli_ext::commands::rank_run(args, &ctx),
        Commands::Problem(cmd) => ordo::cli_ext::commands::problem_run(cmd, &ctx),
        Commands::Reference(args) => ordo::cli_ext::commands::reference_run(args, &ctx),
        Commands::Candidate(args) => ordo::cli_ext::commands::candidate_run(args, &ctx),
        Commands::History(args) => ordo::cli_ext::commands::history_run(args, &ctx),
        Commands::Init(args) => ordo::infra::config::init(args, &ctx),
        Commands::Completions(args) => ordo::completion::run(args),
    }
}
