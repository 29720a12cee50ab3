//! Error types for engine rounds and locator runs.
//!
//! Count mismatches are never errors here — they are the signal the locator
//! searches for. Errors mean the round itself could not be trusted, and all
//! of them abort the run: a flaky engine response would make the bisection
//! result meaningless.

use std::time::Duration;

use thiserror::Error;

/// Which of the two engines a round was issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EngineSide {
    Reference,
    Test,
}

/// A single engine request failed.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine process could not be started.
    #[error("failed to start engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine exited (or closed its output) before the terminal
    /// `Nodes searched:` line.
    #[error("engine exited unexpectedly: {detail}")]
    Exited { detail: String },

    /// Output could not be decoded as text, or the stream broke mid-round.
    #[error("protocol failure: {0}")]
    Protocol(String),

    /// No terminal line within the per-request time bound.
    #[error("no node total within {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },
}

/// An [`EngineError`] tagged with the round it occurred in, so a failed run
/// can be reproduced by hand.
#[derive(Error, Debug)]
#[error("{side} engine failed at depth {depth} (fen '{fen}', moves [{}])", .prefix.join(" "))]
pub struct LocateError {
    pub side: EngineSide,
    pub fen: String,
    pub prefix: Vec<String>,
    pub depth: u32,
    #[source]
    pub source: EngineError,
}
