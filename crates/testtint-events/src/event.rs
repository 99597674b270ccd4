// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test event types
//!
//! These mirror the records written by `go test -json` (test2json). Every
//! field is optional on the wire; fields this crate does not use (`Time`,
//! `ImportPath`, ...) are ignored when decoding, and fields of an unexpected
//! type do not reject the record.
//!
//! # Example
//!
//! ```
//! use testtint_events::event::{Action, TestEvent};
//!
//! let event: TestEvent =
//!     serde_json::from_str(r#"{"Package":"p","Test":"t","Action":"fail","Elapsed":0.02}"#)
//!         .unwrap();
//! assert_eq!(event.action, Some(Action::Fail));
//! assert!(event.is_complete());
//! assert_eq!(event.key().as_str(), "p::t");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between package and test name in a [`TestKey`]
pub const KEY_SEPARATOR: &str = "::";

// ============================================================================
// Action
// ============================================================================

/// The kind of event a record describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// The test binary is about to be executed
    Start,
    /// The test has started running
    Run,
    /// The test has been paused
    Pause,
    /// The test has continued running
    Cont,
    /// The test passed
    Pass,
    /// The benchmark printed log output but did not fail
    Bench,
    /// The test or benchmark failed
    Fail,
    /// The test printed output
    Output,
    /// The test was skipped or the package contained no tests
    Skip,
    /// Any action this crate does not know about, kept verbatim
    Other(String),
}

impl Action {
    /// The wire representation of this action
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Bench => "bench",
            Self::Fail => "fail",
            Self::Output => "output",
            Self::Skip => "skip",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "start" => Self::Start,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "cont" => Self::Cont,
            "pass" => Self::Pass,
            "bench" => Self::Bench,
            "fail" => Self::Fail,
            "output" => Self::Output,
            "skip" => Self::Skip,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Test Key
// ============================================================================

/// Identity correlating buffered output and failure state with one test
///
/// `"{package}::{test}"` for test-level events, just the package otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestKey(String);

impl TestKey {
    /// Build a key from a package and an optional test name
    ///
    /// An empty test name is treated as absent.
    #[must_use]
    pub fn new(package: &str, test: Option<&str>) -> Self {
        match test.filter(|t| !t.is_empty()) {
            Some(test) => Self(format!("{package}{KEY_SEPARATOR}{test}")),
            None => Self(package.to_string()),
        }
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TestKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Test Event
// ============================================================================

/// A single decoded record from the event stream
///
/// Decoding goes through a JSON object so that it is as forgiving as the
/// producers it reads from: a repeated key keeps its last value, a
/// non-string `Action` or `Output` is treated as absent, and a non-string
/// `Package` or `Test` is kept as its JSON text. Only input that is not a JSON
/// object fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "Map<String, Value>")]
pub struct TestEvent {
    /// Package (test group) the event belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Test within the package, absent for package-level events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// What happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Text fragment printed by the test, including its newline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Elapsed seconds; only its presence is meaningful
    ///
    /// `"Elapsed": null` decodes to `Some(Value::Null)` so that a present but
    /// null field still counts as a completion signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Value>,
}

/// A name-like field: strings as-is, `null` as absent, anything else as JSON text
fn name_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// A text field: only strings count
fn text_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

impl From<Map<String, Value>> for TestEvent {
    fn from(mut record: Map<String, Value>) -> Self {
        Self {
            package: name_field(record.remove("Package")),
            test: name_field(record.remove("Test")),
            action: text_field(record.remove("Action")).map(Action::from),
            output: text_field(record.remove("Output")),
            elapsed: record.remove("Elapsed"),
        }
    }
}

impl TestEvent {
    /// The key this event's output and state are tracked under
    #[must_use]
    pub fn key(&self) -> TestKey {
        TestKey::new(self.package.as_deref().unwrap_or_default(), self.test())
    }

    /// The test name, if present and non-empty
    #[must_use]
    pub fn test(&self) -> Option<&str> {
        self.test.as_deref().filter(|t| !t.is_empty())
    }

    /// The output fragment, if present and non-empty
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref().filter(|o| !o.is_empty())
    }

    /// Whether this event reports a failure
    #[must_use]
    pub fn is_fail(&self) -> bool {
        self.action == Some(Action::Fail)
    }

    /// Whether this event ends its test or package (carries `Elapsed`)
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed.is_some()
    }
}
