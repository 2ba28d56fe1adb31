use anyhow::Context;
use clap::Parser;
use robogrid::judge::LocalJudge;
use robogrid::logging;
use robogrid::problem::Problem;
use robogrid::search::{SearchOptions, solve};
use std::path::PathBuf;

/// Checks a solver output file against its input.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file
    input: PathBuf,
    /// Path to the solver output
    output: PathBuf,
    /// Also require the plan to be optimal (runs the reference search)
    #[arg(long, default_value_t = false)]
    optimal: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("No such input: {}", cli.input.display()))?;
    let output = std::fs::read_to_string(&cli.output)
        .with_context(|| format!("No such output: {}", cli.output.display()))?;
    let problem = Problem::parse(&input).context("Invalid problem input")?;

    let expected = if cli.optimal {
        let (outcome, _) = solve(&problem, SearchOptions::default());
        Some(outcome.plan().map(|p| p.steps()))
    } else {
        None
    };
    let name = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let judge = LocalJudge::new(&name, problem);
    if !judge.judge(&output, expected) {
        std::process::exit(1);
    }
    Ok(())
}
