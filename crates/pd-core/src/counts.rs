//! Per-move node counts and the engine seam.
//!
//! A [`CountMap`] is one engine's answer for one (fen, prefix, depth)
//! triple: each immediate legal move mapped to the node count of its
//! subtree. `BTreeMap` keeps keys in lexicographic order, which the
//! locator's tie-break rule depends on.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Move token (origin square, destination square, optional promotion piece)
/// mapped to its subtree node count.
pub type CountMap = BTreeMap<String, u64>;

/// Full answer to one perft request: the first-ply breakdown plus the
/// aggregate from the terminal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerftCounts {
    pub moves: CountMap,
    pub total: u64,
}

/// A move-generator reachable through the perft text protocol, whatever the
/// transport. One request completes before the next is issued to the same
/// engine.
pub trait PerftEngine {
    /// Run a perft search `depth` plies deep from `fen` after applying
    /// `moves`, returning the per-move breakdown and the node total.
    fn perft(&mut self, fen: &str, moves: &[String], depth: u32) -> Result<PerftCounts, EngineError>;
}

/// Collect one engine's per-move breakdown for the given round.
///
/// Thin pass-through over [`PerftEngine::perft`]: no retries, errors
/// propagate unchanged. A breakdown that does not sum to the reported total
/// is logged but kept — the per-move counts are what the locator compares.
pub fn collect(
    engine: &mut dyn PerftEngine,
    fen: &str,
    moves: &[String],
    depth: u32,
) -> Result<CountMap, EngineError> {
    let counts = engine.perft(fen, moves, depth)?;
    let sum: u64 = counts.moves.values().sum();
    if sum != counts.total {
        warn!(
            "breakdown sums to {sum} but engine reported {} nodes (fen '{fen}', depth {depth})",
            counts.total
        );
    }
    Ok(counts.moves)
}
