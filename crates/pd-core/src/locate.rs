//! The divergence locator.
//!
//! Drives both engines along a growing move prefix at shrinking depth until
//! the first point of disagreement is isolated to a single ply, or the
//! engines turn out to agree after all.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::counts::{CountMap, PerftEngine, collect};
use crate::diff::{DivergenceReport, diff_counts};
use crate::error::{EngineError, EngineSide, LocateError};

/// One comparison round: both engines' first-ply breakdowns at `prefix`,
/// searched to the remaining `depth`, and their diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub depth: u32,
    pub prefix: Vec<String>,
    pub report: DivergenceReport,
}

/// Terminal state of a locator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Both engines reported identical counts at the final prefix.
    Agreement,
    /// The disagreement was narrowed to single moves at depth 1.
    Divergence {
        /// Moves leading from the start position to the divergent ply.
        prefix: Vec<String>,
        /// Sorted disagreeing move keys at that ply.
        moves: Vec<String>,
        /// The final round's diff.
        report: DivergenceReport,
    },
}

/// Narrow down the first perft disagreement between two engines.
///
/// Each round collects both engines' first-ply breakdowns at the current
/// prefix (searching the *remaining* depth), diffs them, and hands the
/// round to `on_round`. Agreement ends the run; otherwise the
/// lexicographically smallest disagreeing move extends the prefix and the
/// depth shrinks by one, so the run takes at most `depth` rounds. The
/// smallest-key tie-break makes repeated runs against the same engines
/// follow the identical path. A zero depth compares nothing and reports
/// agreement without touching either engine.
///
/// Any engine failure aborts the run with the offending round attached.
/// There are no retries: a flaky response would poison the bisection.
pub fn locate<R, T, F>(
    reference: &mut R,
    test: &mut T,
    fen: &str,
    depth: u32,
    mut on_round: F,
) -> Result<Outcome, LocateError>
where
    R: PerftEngine,
    T: PerftEngine,
    F: FnMut(&Round),
{
    // Zero plies means zero rounds: nothing is searched, so there is
    // nothing to disagree on.
    if depth == 0 {
        return Ok(Outcome::Agreement);
    }

    let mut prefix: Vec<String> = Vec::new();
    let mut depth = depth;

    loop {
        let reference_counts = round_counts(reference, EngineSide::Reference, fen, &prefix, depth)?;
        let test_counts = round_counts(test, EngineSide::Test, fen, &prefix, depth)?;

        let round = Round {
            depth,
            prefix: prefix.clone(),
            report: diff_counts(&reference_counts, &test_counts),
        };
        debug!(
            "depth {depth}, prefix [{}]: {} disagreeing move(s)",
            prefix.join(" "),
            round.report.keys().len()
        );
        on_round(&round);

        if round.report.is_empty() {
            return Ok(Outcome::Agreement);
        }

        let moves = round.report.keys();
        if depth == 1 {
            // Leaf moves whose counts genuinely differ, or that one side
            // lacks entirely. No further narrowing is possible.
            return Ok(Outcome::Divergence {
                prefix,
                moves,
                report: round.report,
            });
        }

        prefix.push(moves[0].clone());
        depth -= 1;
    }
}

fn round_counts(
    engine: &mut dyn PerftEngine,
    side: EngineSide,
    fen: &str,
    prefix: &[String],
    depth: u32,
) -> Result<CountMap, LocateError> {
    collect(engine, fen, prefix, depth).map_err(|source| fail(side, fen, prefix, depth, source))
}

fn fail(
    side: EngineSide,
    fen: &str,
    prefix: &[String],
    depth: u32,
    source: EngineError,
) -> LocateError {
    LocateError {
        side,
        fen: fen.to_string(),
        prefix: prefix.to_vec(),
        depth,
        source,
    }
}
