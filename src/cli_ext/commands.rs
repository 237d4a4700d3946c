//! Command runners for the ordo CLI.
//!
//! Thin glue: open the store from config (+ `--db` override), call the
//! library, print plain, `--json`, or tabled output.

use std::cmp::Ordering;
use std::fs;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use serde_json::{Value as Json, json};
use tabled::{Table, Tabled};

use crate::cli::{
    AppContext, CandidateArgs, CompareArgs, HistoryArgs, ProblemCommand, ProblemDeleteArgs,
    ProblemListArgs, ProblemShowArgs, ProblemUpsertArgs, RankArgs, ReferenceArgs,
};
use crate::core::ordering::{compare_complexity, compare_overall};
use crate::core::store::{ProblemId, SolutionId, Store, StoreOptions, Winner};
use crate::infra::config::load_config;

pub fn compare_run(args: CompareArgs, ctx: &AppContext) -> Result<()> {
    let ord = compare_complexity(&args.a, &args.b);

    if args.json {
        println!(
            "{}",
            json!({ "a": args.a, "b": args.b, "ordering": ordering_word(ord) })
        );
        return Ok(());
    }

    print_verdict(&args.a, &args.b, ord, ctx);
    Ok(())
}

pub fn rank_run(args: RankArgs, ctx: &AppContext) -> Result<()> {
    let overall = compare_overall(&args.time_a, &args.space_a, &args.time_b, &args.space_b);
    let winner = Winner::from(overall);

    let mut recorded = None;
    if let Some(problem) = args.record {
        let (Some(first), Some(second)) = (args.first, args.second) else {
            bail!("--record requires --first and --second solution ids");
        };

        let store = open_store(ctx)?;
        let verdict = json!({
            "time_a": args.time_a,
            "space_a": args.space_a,
            "time_b": args.time_b,
            "space_b": args.space_b,
            "winner": winner.as_str(),
        });
        let id = store.record_comparison(
            ProblemId(problem),
            SolutionId(first),
            SolutionId(second),
            winner,
            &verdict,
        )?;
        recorded = Some(id);
    }

    if args.json {
        println!(
            "{}",
            json!({
                "winner": winner.as_str(),
                "comparison_id": recorded.map(|c| c.0),
            })
        );
        return Ok(());
    }

    let label = match winner {
        Winner::A => "first solution wins",
        Winner::B => "second solution wins",
        Winner::Tie => "tie",
    };
    if ctx.no_color {
        println!("{label}");
    } else {
        println!("{}", label.bold());
    }
    if let Some(id) = recorded {
        if !ctx.quiet {
            println!("recorded comparison {}", id.0);
        }
    }
    Ok(())
}

pub fn problem_run(cmd: ProblemCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        ProblemCommand::Upsert(args) => problem_upsert(args, ctx),
        ProblemCommand::Show(args) => problem_show(args, ctx),
        ProblemCommand::List(args) => problem_list(args, ctx),
        ProblemCommand::Delete(args) => problem_delete(args, ctx),
    }
}

pub fn reference_run(args: ReferenceArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let cfg = parse_payload(args.cfg.as_deref())?;

    let id = store.save_reference(
        ProblemId(args.problem),
        args.kind.into(),
        &args.content,
        &cfg,
        &args.time,
        &args.space,
        args.category.as_deref(),
        args.owner.as_deref(),
    )?;

    if !ctx.quiet {
        println!("reference solution {} for problem {}", id.0, args.problem);
    }
    Ok(())
}

pub fn candidate_run(args: CandidateArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let cfg = parse_payload(args.cfg.as_deref())?;
    let eval = args
        .eval
        .as_deref()
        .map(|raw| parse_payload(Some(raw)))
        .transpose()?;

    let id = store.upsert_candidate_solution(
        ProblemId(args.problem),
        &args.owner,
        args.kind.into(),
        &args.content,
        &cfg,
        args.score,
        eval.as_ref(),
    )?;

    if !ctx.quiet {
        let row = store.solution(id)?.context("candidate row vanished")?;
        if row.evaluation_score == Some(args.score) {
            println!("candidate solution {} (score {})", id.0, args.score);
        } else {
            println!(
                "candidate solution {} kept earlier score {}",
                id.0,
                row.evaluation_score.unwrap_or_default()
            );
        }
    }
    Ok(())
}

pub fn history_run(args: HistoryArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let records = store.comparisons_for(ProblemId(args.problem), args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        if !ctx.quiet {
            println!("no comparisons recorded for problem {}", args.problem);
        }
        return Ok(());
    }

    let rows: Vec<HistoryRow> = records
        .iter()
        .map(|r| HistoryRow {
            id: r.id.0,
            first: r.solution_a.0,
            second: r.solution_b.0,
            winner: r.winner.as_str().to_string(),
            at: r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

// ── Problem subcommands ────────────────────────────────────────────

fn problem_upsert(args: ProblemUpsertArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let up = store.upsert_problem(&args.statement)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&up)?);
        return Ok(());
    }

    let how = if up.created {
        "new".to_string()
    } else if let Some(score) = up.similarity {
        format!("similar, {score:.2}")
    } else {
        "existing".to_string()
    };
    println!("problem {} ({how})", up.id.0);
    Ok(())
}

fn problem_show(args: ProblemShowArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let Some(problem) = store.problem(ProblemId(args.id))? else {
        bail!("problem {} not found", args.id);
    };
    let solutions = store.solutions_for(problem.id)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "problem": problem,
                "solutions": solutions,
            }))?
        );
        return Ok(());
    }

    println!("problem {}", problem.id.0);
    println!("  statement: {}", problem.statement);
    if let Some(t) = &problem.optimal_time_complexity {
        println!("  optimal time:  {t}");
    }
    if let Some(s) = &problem.optimal_space_complexity {
        println!("  optimal space: {s}");
    }
    if let Some(c) = &problem.category {
        println!("  category: {c}");
    }
    println!("  canonicalized: {}", problem.canonical_cfg.is_some());

    for sol in &solutions {
        let marker = if sol.is_reference { "reference" } else { "candidate" };
        let owner = sol.owner.as_deref().unwrap_or("-");
        let score = sol
            .evaluation_score
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "  solution {} [{marker}] kind={} owner={owner} score={score}",
            sol.id.0,
            sol.kind.as_str()
        );
    }
    Ok(())
}

fn problem_list(args: ProblemListArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    let problems = store.list_problems()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&problems)?);
        return Ok(());
    }
    if problems.is_empty() {
        if !ctx.quiet {
            println!("no problems stored");
        }
        return Ok(());
    }

    let rows: Vec<ProblemRow> = problems
        .iter()
        .map(|p| ProblemRow {
            id: p.id.0,
            statement: ellipsize(&p.statement, 48),
            time: p
                .optimal_time_complexity
                .clone()
                .unwrap_or_else(|| "-".into()),
            space: p
                .optimal_space_complexity
                .clone()
                .unwrap_or_else(|| "-".into()),
            category: p.category.clone().unwrap_or_else(|| "-".into()),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

fn problem_delete(args: ProblemDeleteArgs, ctx: &AppContext) -> Result<()> {
    let store = open_store(ctx)?;
    if !store.delete_problem(ProblemId(args.id))? {
        bail!("problem {} not found", args.id);
    }
    if !ctx.quiet {
        println!("deleted problem {}", args.id);
    }
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

/// Open the store from layered config, honoring the `--db` override.
fn open_store(ctx: &AppContext) -> Result<Store> {
    let cfg = load_config().context("load configuration")?;
    let path = ctx.db.clone().unwrap_or(cfg.db_path);
    let options = StoreOptions {
        similarity_threshold: cfg.matcher.threshold,
        content_limit: cfg.store.content_limit,
    };

    Store::open(&path, options).with_context(|| format!("open store at {}", path.display()))
}

/// Inline JSON or `@path` indirection; a missing payload becomes `{}`.
fn parse_payload(arg: Option<&str>) -> Result<Json> {
    let Some(raw) = arg else {
        return Ok(json!({}));
    };

    let text = if let Some(path) = raw.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("read payload file {path}"))?
    } else {
        raw.to_string()
    };
    serde_json::from_str(&text).context("parse payload JSON")
}

fn ordering_word(ord: Ordering) -> &'static str {
    match ord {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

fn print_verdict(a: &str, b: &str, ord: Ordering, ctx: &AppContext) {
    let sym = match ord {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };

    if ctx.no_color {
        println!("{a} {sym} {b}");
        return;
    }
    match ord {
        Ordering::Less => println!("{} {sym} {}", a.green(), b.red()),
        Ordering::Greater => println!("{} {sym} {}", a.red(), b.green()),
        Ordering::Equal => println!("{} {sym} {}", a.cyan(), b.cyan()),
    }
}

fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[derive(Tabled)]
struct ProblemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Statement")]
    statement: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Category")]
    category: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "First")]
    first: i64,
    #[tabled(rename = "Second")]
    second: i64,
    #[tabled(rename = "Winner")]
    winner: String,
    #[tabled(rename = "At")]
    at: String,
}
