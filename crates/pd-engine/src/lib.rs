//! Subprocess transport for perft engines.
//!
//! Implements `pd_core::PerftEngine` over a child process speaking the
//! perft text protocol on its standard streams:
//!
//! - `protocol`: request text and response line grammar
//! - `process`: spawning, the round timeout, and child reaping

pub mod process;
pub mod protocol;

pub use process::{DEFAULT_TIMEOUT, SubprocessEngine};
