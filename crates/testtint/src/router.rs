// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Event classification and stream routing
//!
//! The [`Router`] consumes decoded events one at a time and writes each output
//! fragment, color-coded, to either the primary (stdout) or the diagnostic
//! (stderr) sink. Output of a running test is buffered per [`TestKey`] so that
//! it can be replayed on the diagnostic sink if the test fails.
//!
//! # Example
//!
//! ```
//! use testtint::router::{RunOutcome, Router};
//! use testtint_events::EventReader;
//!
//! let input = concat!(
//!     r#"{"Package":"p","Test":"t","Action":"output","Output":"ok\n"}"#, "\n",
//!     r#"{"Package":"p","Test":"t","Action":"pass","Elapsed":0.01}"#, "\n",
//! );
//! let mut router = Router::new(Vec::new(), Vec::new());
//! let outcome = router.run(&mut EventReader::new(input.as_bytes())).unwrap();
//! assert_eq!(outcome, RunOutcome::Passed);
//!
//! let (stdout, stderr) = router.into_sinks();
//! assert_eq!(stdout, b"\x1b[90mok\n\x1b[0m");
//! assert!(stderr.is_empty());
//! ```

use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use thiserror::Error;
use tracing::debug;

use testtint_events::{EventReader, EventsError, TestEvent, TestKey};

use crate::palette::{Stream, Tint, classify};

// ============================================================================
// Error Types
// ============================================================================

/// Routing errors
#[derive(Debug, Error)]
pub enum RouteError {
    /// Reading the event stream failed
    #[error("Failed to read test events: {0}")]
    Read(#[from] EventsError),

    /// Writing to or flushing an output stream failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Outcome and Statistics
// ============================================================================

/// Overall result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No `fail` action was observed
    Passed,
    /// At least one `fail` action was observed
    Failed,
}

impl RunOutcome {
    /// Process exit status for this outcome
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }

    /// Process exit code for this outcome
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Counters describing what a router did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    /// Input lines read, including skipped ones
    pub lines: usize,
    /// Events routed
    pub events: usize,
    /// Blank or undecodable lines skipped
    pub skipped: usize,
    /// Fragments written to the primary stream
    pub primary_writes: usize,
    /// Fragments written to the diagnostic stream
    pub diagnostic_writes: usize,
    /// `fail` actions observed
    pub failures: usize,
}

// ============================================================================
// Router
// ============================================================================

/// Routes output fragments to a primary and a diagnostic sink
pub struct Router<O, E> {
    primary: O,
    diagnostic: E,
    buffers: HashMap<TestKey, Vec<String>>,
    failed: HashSet<TestKey>,
    any_failed: bool,
    stats: RouteStats,
}

impl<O: Write, E: Write> Router<O, E> {
    /// Create a router writing to the given sinks
    #[must_use]
    pub fn new(primary: O, diagnostic: E) -> Self {
        Self {
            primary,
            diagnostic,
            buffers: HashMap::new(),
            failed: HashSet::new(),
            any_failed: false,
            stats: RouteStats::default(),
        }
    }

    /// Route every event from `reader` until end of stream
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Read` if the input stream fails and
    /// `RouteError::Io` if an output sink fails. Undecodable lines are not
    /// errors; they are skipped by the reader.
    pub fn run<R: BufRead>(
        &mut self,
        reader: &mut EventReader<R>,
    ) -> Result<RunOutcome, RouteError> {
        while let Some(event) = reader.next_event()? {
            self.route(&event)?;
        }

        let read = reader.stats();
        self.stats.lines = read.lines;
        self.stats.skipped = read.blank + read.malformed;

        debug!(
            lines = self.stats.lines,
            events = self.stats.events,
            skipped = self.stats.skipped,
            primary = self.stats.primary_writes,
            diagnostic = self.stats.diagnostic_writes,
            failures = self.stats.failures,
            "event stream finished"
        );

        Ok(self.outcome())
    }

    /// Route a single event
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Io` if writing to or flushing a sink fails.
    pub fn route(&mut self, event: &TestEvent) -> Result<(), RouteError> {
        self.stats.events += 1;
        let key = event.key();
        let output = event.output();

        if let (Some(_), Some(text)) = (event.test(), output) {
            self.buffers
                .entry(key.clone())
                .or_default()
                .push(text.to_string());
        }

        if event.is_fail() {
            self.stats.failures += 1;
            self.any_failed = true;
            if self.failed.insert(key.clone()) {
                debug!(key = %key, "test failed");
            }

            // Replay everything the test printed so far. This includes the
            // fragment carried by this event, which is classified again below.
            if let Some(fragments) = self.buffers.get(&key) {
                for fragment in fragments {
                    Tint::Failed.write_to(&mut self.diagnostic, fragment)?;
                    self.stats.diagnostic_writes += 1;
                }
            }
        }

        if let Some(text) = output {
            let tint = classify(text, self.failed.contains(&key));
            self.emit(tint, text)?;
        }

        if event.is_complete() {
            self.buffers.remove(&key);
            self.failed.remove(&key);
        }

        Ok(())
    }

    fn emit(&mut self, tint: Tint, text: &str) -> io::Result<()> {
        match tint.stream() {
            Stream::Primary => {
                tint.write_to(&mut self.primary, text)?;
                self.stats.primary_writes += 1;
            }
            Stream::Diagnostic => {
                tint.write_to(&mut self.diagnostic, text)?;
                self.stats.diagnostic_writes += 1;
            }
        }
        Ok(())
    }

    /// Whether a `fail` action has been observed so far
    #[must_use]
    pub fn any_failed(&self) -> bool {
        self.any_failed
    }

    /// The outcome of the run so far
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        if self.any_failed {
            RunOutcome::Failed
        } else {
            RunOutcome::Passed
        }
    }

    /// Whether `key` has failed and not yet completed
    #[must_use]
    pub fn is_failed(&self, key: &TestKey) -> bool {
        self.failed.contains(key)
    }

    /// Output buffered for `key`, if any
    #[must_use]
    pub fn buffered(&self, key: &TestKey) -> Option<&[String]> {
        self.buffers.get(key).map(Vec::as_slice)
    }

    /// Number of keys with buffered output
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffers.len()
    }

    /// Counters for everything routed so far
    #[must_use]
    pub fn stats(&self) -> RouteStats {
        self.stats
    }

    /// Consume the router, returning the primary and diagnostic sinks
    pub fn into_sinks(self) -> (O, E) {
        (self.primary, self.diagnostic)
    }
}
