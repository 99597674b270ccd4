// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test fixtures for testtint integration tests
//!
//! This module provides helpers for building event lines, rendering a stream
//! through the router, and spelling out expected tinted output.

#![allow(dead_code)]

use serde_json::{Map, Value, json};
use testtint::palette::Tint;
use testtint::router::{RouteStats, Router, RunOutcome};
use testtint_events::EventReader;

// ============================================================================
// Event Lines
// ============================================================================

/// Build a single test2json line
pub fn line(
    package: &str,
    test: Option<&str>,
    action: &str,
    output: Option<&str>,
    elapsed: Option<f64>,
) -> String {
    let mut record = Map::new();
    record.insert("Time".to_string(), json!("2026-01-12T10:15:01.101Z"));
    record.insert("Action".to_string(), json!(action));
    record.insert("Package".to_string(), json!(package));
    if let Some(test) = test {
        record.insert("Test".to_string(), json!(test));
    }
    if let Some(output) = output {
        record.insert("Output".to_string(), json!(output));
    }
    if let Some(elapsed) = elapsed {
        record.insert("Elapsed".to_string(), json!(elapsed));
    }
    Value::Object(record).to_string()
}

/// An `output` event for a test
pub fn output(test: &str, text: &str) -> String {
    line("p", Some(test), "output", Some(text), None)
}

/// A `run` event for a test
pub fn run(test: &str) -> String {
    line("p", Some(test), "run", None, None)
}

/// A completing `pass` event for a test
pub fn pass(test: &str) -> String {
    line("p", Some(test), "pass", None, Some(0.01))
}

/// A completing `fail` event for a test
pub fn fail(test: &str) -> String {
    line("p", Some(test), "fail", None, Some(0.02))
}

/// Join lines into a newline-terminated stream
pub fn stream<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for l in lines {
        out.push_str(l.as_ref());
        out.push('\n');
    }
    out
}

// ============================================================================
// Rendering
// ============================================================================

/// Everything a run produced
#[derive(Debug)]
pub struct Rendered {
    /// Primary stream contents
    pub stdout: String,
    /// Diagnostic stream contents
    pub stderr: String,
    /// Reported outcome
    pub outcome: RunOutcome,
    /// Router counters
    pub stats: RouteStats,
}

/// Route `input` through a fresh router capturing both streams
pub fn render(input: &str) -> Rendered {
    let mut router = Router::new(Vec::new(), Vec::new());
    let outcome = router
        .run(&mut EventReader::new(input.as_bytes()))
        .expect("Routing in memory should not fail");
    let stats = router.stats();
    let (stdout, stderr) = router.into_sinks();
    Rendered {
        stdout: String::from_utf8(stdout).expect("stdout should be UTF-8"),
        stderr: String::from_utf8(stderr).expect("stderr should be UTF-8"),
        outcome,
        stats,
    }
}

// ============================================================================
// Expected Output
// ============================================================================

/// `text` in the neutral color
pub fn neutral(text: &str) -> String {
    Tint::Neutral.paint(text)
}

/// `text` in the failed color
pub fn failed(text: &str) -> String {
    Tint::Failed.paint(text)
}

/// `text` in the hard-failure color
pub fn hard(text: &str) -> String {
    Tint::HardFailure.paint(text)
}
