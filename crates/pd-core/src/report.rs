//! Rendering of rounds and run outcomes.
//!
//! Human-readable tables and traces for stdout, plus a machine-readable
//! run report.

use serde::{Deserialize, Serialize};

use crate::locate::{Outcome, Round};

const COL: usize = 10;

/// Render one round's diff as a table keyed by move.
///
/// The first header cell carries the remaining depth; the value columns are
/// blank wherever a set lacks the key. Returns an empty string for an
/// agreeing round.
pub fn render_round(round: &Round) -> String {
    if round.report.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let depth_header = format!("Depth: {}", round.depth);
    for header in [depth_header.as_str(), "Expected", "Extra", "Wrong", "Missing"] {
        out.push_str(&format!("{header:<COL$}"));
    }
    out.push('\n');

    let report = &round.report;
    for key in report.keys() {
        out.push_str(&format!("{key:<COL$}"));
        for set in [&report.expected, &report.extra, &report.wrong, &report.missing] {
            match set.get(&key) {
                Some(count) => out.push_str(&format!("{count:<COL$}")),
                None => out.push_str(&" ".repeat(COL)),
            }
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Render the terminal trace: `All keys match` on agreement, otherwise one
/// line per divergent move giving the full reproducing move sequence.
///
/// A move the reference engine knows about (absent or miscounted in the
/// test engine) is tagged `Missing`; a move only the test engine produced
/// is tagged `Extra`.
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Agreement => "All keys match\n".to_string(),
        Outcome::Divergence {
            prefix,
            moves,
            report,
        } => {
            let mut out = String::new();
            for key in moves {
                let tag = if report.extra.contains_key(key) {
                    "Extra"
                } else {
                    "Missing"
                };
                out.push_str(tag);
                out.push_str(": ");
                for mv in prefix {
                    out.push_str(mv);
                    out.push(' ');
                }
                out.push_str(key);
                out.push('\n');
            }
            out
        }
    }
}

/// Machine-readable summary of a whole locator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Start position.
    pub fen: String,
    /// Initial search depth in plies.
    pub depth: u32,
    /// Every comparison round, in order.
    pub rounds: Vec<Round>,
    pub outcome: Outcome,
}

impl RunReport {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
