use anyhow::Context;
use clap::Parser;
use robogrid::plan::{NO_SOLUTION, Plan};
use robogrid::problem::Problem;
use robogrid::svg;
use std::path::PathBuf;

/// Renders a board, and optionally a solver output on top of it, as SVG.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file
    input: PathBuf,
    /// Solver output to draw
    #[arg(long)]
    plan: Option<PathBuf>,
    /// Path to the SVG file. If not provided, outputs to stdout.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("No such input: {}", cli.input.display()))?;
    let problem = Problem::parse(&input).context("Invalid problem input")?;
    let plan = match &cli.plan {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("No such plan: {}", path.display()))?;
            if text.trim() == NO_SOLUTION {
                None
            } else {
                Some(Plan::parse(&text, problem.robot_count).context("Invalid plan")?)
            }
        }
        None => None,
    };
    let doc = svg::render(&problem, plan.as_ref());
    match &cli.output {
        Some(path) => std::fs::write(path, doc)
            .with_context(|| format!("Cannot create {}", path.display()))?,
        None => println!("{}", doc),
    }
    Ok(())
}
