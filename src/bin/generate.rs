use anyhow::bail;
use clap::Parser;
use clap::ValueEnum;
use robogrid::mapgen::random::{GenParams, generate};
use robogrid::svg;
use std::fs;

#[derive(Parser)]
struct Cli {
    /// Board height.
    #[clap(long, short = 'H', default_value_t = 6)]
    height: usize,
    /// Board width.
    #[clap(long, short = 'W', default_value_t = 6)]
    width: usize,
    /// Number of robots (1 to 3).
    #[clap(long, short = 'r', default_value_t = 2)]
    robots: usize,
    /// Minimum distance between robots.
    #[clap(long, short = 'd', default_value_t = 1.0)]
    min_distance: f64,
    /// Time limit in steps.
    #[clap(long, short = 't', default_value_t = 20)]
    time_limit: usize,
    /// Fraction of cells to block.
    #[clap(long, default_value_t = 0.2)]
    obstacles: f64,
    #[clap(long, short = 's')]
    seed: Option<u64>,
    /// Path to output file. If not provided, outputs to stdout.
    #[clap(long, short = 'o', default_value = "")]
    output: String,
    /// File format: text, json or svg. If not provided, infers from output file extension.
    #[clap(long, short = 'f', default_value = "unspecified")]
    format: Format,
}

#[derive(Default, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Unspecified,
    Text,
    Json,
    Svg,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let params = GenParams {
        height: args.height,
        width: args.width,
        robots: args.robots,
        min_distance: args.min_distance,
        time_limit: args.time_limit,
        obstacle_ratio: args.obstacles,
    };
    let problem = generate(&params, args.seed)?;
    // Infer format from output file extension if not specified.
    let format = if args.format == Format::Unspecified {
        if args.output.ends_with(".json") {
            Format::Json
        } else if args.output.ends_with(".svg") {
            Format::Svg
        } else if args.output.is_empty() || args.output.ends_with(".txt") {
            Format::Text
        } else {
            bail!("Cannot infer format from output file extension. Specify format with -f option.")
        }
    } else {
        args.format.clone()
    };

    use std::io::Write;

    let mut w: Box<dyn Write> = if args.output.is_empty() {
        Box::new(std::io::stdout())
    } else {
        Box::new(fs::File::create(&args.output)?)
    };
    match format {
        Format::Text => write!(w, "{}", problem)?,
        Format::Json => {
            let value = serde_json::json!({
                "height": problem.grid.height(),
                "width": problem.grid.width(),
                "robots": problem.robot_count,
                "minDistance": problem.min_distance,
                "timeLimit": problem.time_limit,
                "starts": problem.starts,
                "goals": problem.goals,
                "board": problem.grid.to_string().lines().collect::<Vec<_>>(),
            });
            writeln!(w, "{}", serde_json::to_string_pretty(&value)?)?
        }
        Format::Svg => writeln!(w, "{}", svg::render(&problem, None))?,
        Format::Unspecified => unreachable!(),
    }
    Ok(())
}
