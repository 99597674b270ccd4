// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Color markers and fragment classification

use std::io::{self, Write};

/// Sequence restoring the terminal's default color
pub const RESET: &str = "\x1b[0m";

/// Literal whose presence marks a fragment as a hard failure
pub const FAIL_MARKER: &str = "FAIL";

/// Which standard stream a fragment is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// stdout
    Primary,
    /// stderr
    Diagnostic,
}

/// How a fragment is decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Ordinary output of a test not known to have failed (bright black)
    Neutral,
    /// A fragment reporting a failure itself, e.g. `--- FAIL: TestX` (bright red)
    HardFailure,
    /// Output belonging to a failed test (bright yellow)
    Failed,
}

impl Tint {
    /// The SGR sequence that starts this color
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Neutral => "\x1b[90m",
            Self::HardFailure => "\x1b[91m",
            Self::Failed => "\x1b[93m",
        }
    }

    /// The stream fragments with this tint go to
    #[must_use]
    pub fn stream(self) -> Stream {
        match self {
            Self::Neutral => Stream::Primary,
            Self::HardFailure | Self::Failed => Stream::Diagnostic,
        }
    }

    /// Wrap `text` in this tint's color and a reset
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{RESET}", self.code())
    }

    /// Write `text` wrapped in this tint to `w`, then flush `w`
    ///
    /// # Errors
    ///
    /// Returns any error from writing to or flushing `w`.
    pub fn write_to<W: Write + ?Sized>(self, w: &mut W, text: &str) -> io::Result<()> {
        write!(w, "{}{text}{RESET}", self.code())?;
        w.flush()
    }
}

/// Pick the tint for a live output fragment
///
/// Anything mentioning `FAIL` is a hard failure, even for a test that has
/// not failed. Otherwise the fragment takes the failed color once its test
/// has failed.
#[must_use]
pub fn classify(fragment: &str, test_failed: bool) -> Tint {
    if fragment.contains(FAIL_MARKER) {
        Tint::HardFailure
    } else if test_failed {
        Tint::Failed
    } else {
        Tint::Neutral
    }
}
