//! The perft text protocol: request building and response line grammar.
//!
//! Engines receive one directive per line — `position fen <fen> [moves
//! ...]`, `go perft <depth>`, `quit` — and answer with one
//! `"<move>: <count>"` line per legal move followed by exactly one
//! `"Nodes searched: <count>"` terminal line. Anything else (banners,
//! prompts) is ignored.

use std::sync::LazyLock;

use regex::Regex;

static MOVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z][1-8][a-zA-Z][1-8][nbrq]?): (0|[1-9]\d*)$").unwrap());

static TOTAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Nodes searched: (0|[1-9]\d*)$").unwrap());

/// Classification of one engine output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A per-move breakdown line: move token and its subtree count.
    Move(String, u64),
    /// The terminal aggregate line ending the response.
    Total(u64),
    /// Anything outside the protocol grammar.
    Other,
}

/// Classify one line of engine output.
pub fn classify(line: &str) -> Line {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(caps) = MOVE_LINE.captures(line) {
        if let Ok(count) = caps[2].parse() {
            return Line::Move(caps[1].to_string(), count);
        }
    }
    if let Some(caps) = TOTAL_LINE.captures(line) {
        if let Ok(count) = caps[1].parse() {
            return Line::Total(count);
        }
    }
    Line::Other
}

/// Build the full request for one perft round.
///
/// The `moves` clause is omitted when the prefix is empty; the trailing
/// `quit` lets the engine exit on its own once it has answered.
pub fn request(fen: &str, moves: &[String], depth: u32) -> String {
    let mut out = format!("position fen {fen}");
    if !moves.is_empty() {
        out.push_str(" moves");
        for mv in moves {
            out.push(' ');
            out.push_str(mv);
        }
    }
    out.push('\n');
    out.push_str(&format!("go perft {depth}\n"));
    out.push_str("quit\n");
    out
}
