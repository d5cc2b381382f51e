use advent_harness::{Solution, SolutionRunner};
use clap::Parser;

/// Runs the integer-sum demonstration solution through the harness.
#[derive(Parser)]
struct Cli {
    /// Skip the registered test cases and only execute the main input.
    #[clap(long)]
    skip_tests: bool,

    /// Main puzzle input, either literal text or a path to an input file.
    #[clap(long, default_value = "10 20")]
    input: String,
}

/// Sums every whitespace-separated integer in the input.
struct SumSolution;

impl Solution for SumSolution {
    type Answer = i64;

    fn solve(&mut self, input: &str) -> anyhow::Result<i64> {
        let mut total = 0;
        for token in input.split_whitespace() {
            total += token.parse::<i64>()?;
        }
        Ok(total)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ADVENT_LOG"))
        .init();

    let cli = Cli::parse();

    let mut runner = SolutionRunner::new(|| SumSolution)
        .test_case("1 1", 2)
        .test_case("2 2", 4)
        .main_input(&cli.input);

    runner.run(!cli.skip_tests)?;

    Ok(())
}
