//! Process-per-request subprocess engine.
//!
//! Each perft request spawns the configured program, writes the whole
//! request (ending in `quit`), closes stdin, and scrapes stdout until the
//! terminal line. A reader thread feeds lines through a channel so the
//! per-request timeout can fire even while the engine is silent. After a
//! clean round the child gets a short grace to honor `quit`, then is
//! killed; failure paths kill it outright. No engine process outlives its
//! round.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};
use pd_core::{CountMap, EngineError, PerftCounts, PerftEngine};

use crate::protocol::{Line, classify, request};

/// Default per-request bound before a round fails with a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How long a finished round waits for the engine to honor `quit` before
/// killing it.
const REAP_GRACE: Duration = Duration::from_millis(100);

/// A perft engine reached by spawning a subprocess per request.
#[derive(Debug, Clone)]
pub struct SubprocessEngine {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl SubprocessEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Split a whitespace-separated command line into program and
    /// arguments. Returns `None` for a blank command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let mut engine = Self::new(words.next()?);
        engine.args = words.map(str::to_string).collect();
        Some(engine)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl PerftEngine for SubprocessEngine {
    fn perft(&mut self, fen: &str, moves: &[String], depth: u32) -> Result<PerftCounts, EngineError> {
        debug!("spawning '{}' for depth {depth}", self.program);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = run_round(&mut child, self.timeout, fen, moves, depth);
        match &result {
            // The request ended in `quit`, so a well-behaved engine is
            // already exiting. One that keeps running anyway must not
            // stall the round: the answer is in hand, so it gets killed
            // once the grace period runs out.
            Ok(_) => reap(&mut child),
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
        result
    }
}

/// Wait briefly for a voluntary exit, then force one.
fn reap(child: &mut Child) {
    let deadline = Instant::now() + REAP_GRACE;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return,
            Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
            _ => break,
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

fn run_round(
    child: &mut Child,
    timeout: Duration,
    fen: &str,
    moves: &[String],
    depth: u32,
) -> Result<PerftCounts, EngineError> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| EngineError::Protocol("stdin was not captured".into()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| EngineError::Protocol("stdout was not captured".into()))?;

    stdin
        .write_all(request(fen, moves, depth).as_bytes())
        .map_err(|e| EngineError::Exited {
            detail: format!("request could not be written: {e}"),
        })?;
    // Closing stdin gives engines that read input to exhaustion their EOF.
    drop(stdin);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let deadline = Instant::now() + timeout;
    let mut counts = CountMap::new();
    loop {
        let remaining = deadline
            .checked_duration_since(Instant::now())
            .ok_or(EngineError::Timeout { timeout })?;

        match rx.recv_timeout(remaining) {
            Ok(Ok(line)) => {
                trace!("engine: {line}");
                match classify(&line) {
                    Line::Move(mv, count) => {
                        counts.insert(mv, count);
                    }
                    Line::Total(total) => return Ok(PerftCounts { moves: counts, total }),
                    Line::Other => {}
                }
            }
            Ok(Err(e)) => {
                return Err(EngineError::Protocol(format!(
                    "output could not be read as text: {e}"
                )));
            }
            Err(RecvTimeoutError::Timeout) => return Err(EngineError::Timeout { timeout }),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(EngineError::Exited {
                    detail: "stdout closed before the node total".into(),
                });
            }
        }
    }
}
