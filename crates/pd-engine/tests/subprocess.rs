//! Round trips against `sh` stand-in engines.

#![cfg(unix)]

use std::time::{Duration, Instant};

use pd_core::{EngineError, PerftEngine};
use pd_engine::SubprocessEngine;

/// Engine that swallows its input, then prints a canned response.
fn canned(output: &str) -> SubprocessEngine {
    SubprocessEngine::new("sh")
        .arg("-c")
        .arg(format!("cat >/dev/null; printf '{output}'"))
}

#[test]
fn round_trip_collects_moves_and_total() {
    let mut engine = canned("id kchess debug\na2a3: 1\nb1c3: 20\nh7h8q: 4\nNodes searched: 25\n");
    let counts = engine.perft("fen", &[], 2).unwrap();

    assert_eq!(counts.total, 25);
    assert_eq!(counts.moves.len(), 3);
    assert_eq!(counts.moves["a2a3"], 1);
    assert_eq!(counts.moves["b1c3"], 20);
    assert_eq!(counts.moves["h7h8q"], 4);
}

#[test]
fn banner_lines_are_skipped() {
    let mut engine = canned("Some Engine v1.2 by Somebody\n\ne2e4: 20\nNodes searched: 20\n");
    let counts = engine.perft("fen", &[], 1).unwrap();
    assert_eq!(counts.moves.len(), 1);
    assert_eq!(counts.total, 20);
}

#[test]
fn output_after_the_terminal_line_is_not_consumed() {
    let mut engine = canned("e2e4: 20\nNodes searched: 20\nd2d4: 99\n");
    let counts = engine.perft("fen", &[], 1).unwrap();
    assert!(!counts.moves.contains_key("d2d4"));
}

#[test]
fn exit_without_terminal_line_is_a_process_error() {
    let mut engine = canned("e2e4: 20\n");
    let err = engine.perft("fen", &[], 1).unwrap_err();
    assert!(matches!(err, EngineError::Exited { .. }), "got {err:?}");
}

#[test]
fn immediate_crash_is_a_process_error() {
    let mut engine = SubprocessEngine::new("sh").arg("-c").arg("exit 3");
    let err = engine.perft("fen", &[], 1).unwrap_err();
    assert!(matches!(err, EngineError::Exited { .. }), "got {err:?}");
}

#[test]
fn silent_engine_times_out() {
    let mut engine = SubprocessEngine::new("sh")
        .arg("-c")
        .arg("cat >/dev/null; sleep 5")
        .timeout(Duration::from_millis(200));
    let err = engine.perft("fen", &[], 1).unwrap_err();
    assert!(matches!(err, EngineError::Timeout { .. }), "got {err:?}");
}

#[test]
fn engine_lingering_after_the_terminal_line_does_not_stall_the_round() {
    let mut engine = SubprocessEngine::new("sh")
        .arg("-c")
        .arg("cat >/dev/null; printf 'Nodes searched: 0\\n'; sleep 30")
        .timeout(Duration::from_millis(200));

    let start = Instant::now();
    let counts = engine.perft("fen", &[], 1).unwrap();

    assert_eq!(counts.total, 0);
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "round blocked on an engine that ignored quit"
    );
}

#[test]
fn missing_program_is_a_spawn_error() {
    let mut engine = SubprocessEngine::new("no-such-perft-engine-on-path");
    let err = engine.perft("fen", &[], 1).unwrap_err();
    assert!(matches!(err, EngineError::Spawn { .. }), "got {err:?}");
}

#[test]
fn request_reaches_the_engine() {
    // Echo the request back wrapped in protocol lines the parser ignores,
    // except for a count derived from what was received.
    let mut engine = SubprocessEngine::new("sh").arg("-c").arg(
        "input=$(cat); case \"$input\" in \
         *'moves e2e4 e7e5'*'go perft 3'*) printf 'g1f3: 9\\nNodes searched: 9\\n';; \
         *) printf 'Nodes searched: 0\\n';; esac",
    );

    let moves = vec!["e2e4".to_string(), "e7e5".to_string()];
    let counts = engine.perft("some-fen", &moves, 3).unwrap();
    assert_eq!(counts.total, 9, "engine saw the moves clause and depth");

    let counts = engine.perft("some-fen", &[], 3).unwrap();
    assert_eq!(counts.total, 0, "no moves clause without a prefix");
}
