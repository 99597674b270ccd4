// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testtint-events

use thiserror::Error;

/// Errors that can occur while reading a test event stream
#[derive(Debug, Error)]
pub enum EventsError {
    /// A line could not be decoded as a test event
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A line was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Reading the underlying stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EventsError {
    /// Whether this error only affects a single line and the stream can continue
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::Utf8(_))
    }
}
