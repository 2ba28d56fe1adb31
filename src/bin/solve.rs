use anyhow::{Context, bail};
use clap::Parser;
use robogrid::plan::NO_SOLUTION;
use robogrid::problem::Problem;
use robogrid::search::{Outcome, SearchOptions, solve};
use robogrid::{logging, read_input, scenarios};
use std::path::PathBuf;
use std::time::Instant;

/// Finds a minimum-length joint plan and prints one action line per robot.
#[derive(Parser, Debug)]
struct Args {
    #[arg(
        short = 'i',
        long = "input",
        help = "Read input from file instead of stdin"
    )]
    input: Option<PathBuf>,
    /// Solve a built-in scenario instead of reading input.
    #[arg(long, conflicts_with = "input")]
    scenario: Option<String>,
    /// Disable duplicate-state suppression.
    #[arg(long, default_value_t = false)]
    no_dedup: bool,
    /// Evaluate joint moves of each node in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Print the plan as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let problem = match &args.scenario {
        Some(name) => match scenarios::get_scenario(name) {
            Some(s) => s
                .problem()
                .with_context(|| format!("Invalid scenario: {}", name))?,
            None => bail!("Unknown scenario: {}", name),
        },
        None => {
            let input = read_input(args.input.as_deref())?;
            Problem::parse(&input).context("Invalid problem input")?
        }
    };

    let options = SearchOptions {
        dedup: !args.no_dedup,
        parallel: args.parallel,
    };
    let stime = Instant::now();
    let (outcome, stats) = solve(&problem, options);
    let elapsed = stime.elapsed().as_secs_f64();

    match &outcome {
        Outcome::Found(plan) => {
            if args.json {
                println!("{}", plan.to_json());
            } else {
                print!("{}", plan);
            }
            eprintln!("!log steps {}", plan.steps());
        }
        Outcome::Infeasible(reason) => {
            if args.json {
                println!("{}", serde_json::json!({ "steps": null, "robots": null }));
            } else {
                println!("{}", NO_SOLUTION);
            }
            eprintln!("!log infeasible {:?}", reason);
        }
    }
    eprintln!("!log expanded {}", stats.expanded);
    eprintln!("!log generated {}", stats.generated);
    eprintln!("!log duplicates {}", stats.duplicates);
    eprintln!("!log rejected {}", stats.rejected.total());
    eprintln!("!log max_frontier {}", stats.max_frontier);
    eprintln!("!log time {:.3}", elapsed);
    Ok(())
}
