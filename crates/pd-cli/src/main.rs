//! perft-locate: narrow down the first perft disagreement between a
//! reference engine and an engine under test.
//!
//! Exit status: 0 when the engines fully agree, 1 when a divergence was
//! isolated, 2 when a round failed.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::info;

use pd_core::report::{RunReport, render_outcome, render_round};
use pd_core::{LocateError, Outcome, locate};
use pd_engine::SubprocessEngine;

/// Locate the move sequence at which two perft engines disagree.
#[derive(Parser, Debug)]
#[command(name = "perft-locate", version, about, long_about = None)]
struct Args {
    /// Position to investigate, as a FEN string
    fen: String,

    /// Initial search depth in plies
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Reference engine command (program plus arguments)
    #[arg(short = 'r', long = "reference", default_value = "stockfish")]
    reference: String,

    /// Engine under test command (program plus arguments)
    #[arg(short = 't', long = "test")]
    test: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", default_value_t = 120)]
    timeout: u64,

    /// Also print the run report as JSON
    #[arg(long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(Outcome::Agreement) => ExitCode::SUCCESS,
        Ok(Outcome::Divergence { .. }) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Outcome, LocateError> {
    let timeout = Duration::from_secs(args.timeout);
    let mut reference = engine(&args.reference, timeout);
    let mut test = engine(&args.test, timeout);

    info!(
        "comparing '{}' against '{}' at depth {}",
        args.reference, args.test, args.depth
    );

    let mut rounds = Vec::new();
    let outcome = locate(&mut reference, &mut test, &args.fen, args.depth, |round| {
        print!("{}", render_round(round));
        rounds.push(round.clone());
    })?;

    print!("{}", render_outcome(&outcome));

    if args.json {
        let report = RunReport {
            fen: args.fen.clone(),
            depth: args.depth,
            rounds,
            outcome: outcome.clone(),
        };
        println!("{}", report.to_json());
    }

    Ok(outcome)
}

fn engine(command: &str, timeout: Duration) -> SubprocessEngine {
    // Clap never hands us an empty positional, but a command of only
    // whitespace would; fall back to treating it verbatim as the program.
    SubprocessEngine::from_command_line(command)
        .unwrap_or_else(|| SubprocessEngine::new(command))
        .timeout(timeout)
}
