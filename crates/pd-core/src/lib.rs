//! Perft divergence locator core.
//!
//! Finds the exact move sequence at which two chess move-generators
//! disagree on perft node counts, narrowing one ply per round:
//!
//! - `counts`: per-move count maps and the [`PerftEngine`] seam
//! - `diff`: pure count-map diffing into a [`DivergenceReport`]
//! - `locate`: the narrowing loop itself
//! - `report`: round tables, divergence traces, JSON run reports
//! - `error`: round and run error types

pub mod counts;
pub mod diff;
pub mod error;
pub mod locate;
pub mod report;

pub use counts::{CountMap, PerftCounts, PerftEngine, collect};
pub use diff::{DivergenceReport, diff_counts};
pub use error::{EngineError, EngineSide, LocateError};
pub use locate::{Outcome, Round, locate};
