// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line-oriented event reading
//!
//! The event stream is newline-delimited JSON. Lines are read as raw bytes so
//! that a line which is not valid UTF-8 is treated like any other undecodable
//! line instead of ending the stream.
//!
//! # Example
//!
//! ```
//! use testtint_events::EventReader;
//!
//! let input = "{\"Package\":\"p\",\"Action\":\"run\"}\nnot json\n\n";
//! let mut reader = EventReader::new(input.as_bytes());
//!
//! let events: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(reader.stats().malformed, 1);
//! assert_eq!(reader.stats().blank, 1);
//! ```

use std::io::BufRead;

use tracing::trace;

use crate::error::EventsError;
use crate::event::TestEvent;

/// Decode a single line of the event stream
///
/// Surrounding Unicode whitespace is trimmed first. Returns `Ok(None)` for a
/// blank line.
///
/// # Errors
///
/// Returns `EventsError::Utf8` if the line is not valid UTF-8 and
/// `EventsError::JsonParse` if it is not a JSON object.
pub fn decode_line(line: &[u8]) -> Result<Option<TestEvent>, EventsError> {
    let line = std::str::from_utf8(line)?.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some).map_err(EventsError::from)
}

/// Counters describing what an [`EventReader`] has consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Lines read, including blank and malformed ones
    pub lines: usize,
    /// Blank lines skipped
    pub blank: usize,
    /// Lines skipped because they could not be decoded
    pub malformed: usize,
}

impl ReaderStats {
    /// Lines that decoded into an event
    #[must_use]
    pub fn decoded(&self) -> usize {
        self.lines - self.blank - self.malformed
    }
}

/// Streaming reader yielding decoded events
///
/// Blank and undecodable lines are skipped and only show up in
/// [`ReaderStats`]. The iterator yields an error only when the underlying
/// reader fails, after which it is fused.
pub struct EventReader<R> {
    inner: R,
    buf: Vec<u8>,
    stats: ReaderStats,
    done: bool,
}

impl<R: BufRead> EventReader<R> {
    /// Create a reader over a buffered byte stream
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            stats: ReaderStats::default(),
            done: false,
        }
    }

    /// Read up to the next decodable event
    ///
    /// Returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns `EventsError::Io` if reading the underlying stream fails.
    pub fn next_event(&mut self) -> Result<Option<TestEvent>, EventsError> {
        loop {
            self.buf.clear();
            if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.stats.lines += 1;

            match decode_line(&self.buf) {
                Ok(Some(event)) => return Ok(Some(event)),
                Ok(None) => self.stats.blank += 1,
                Err(e) => {
                    self.stats.malformed += 1;
                    trace!(line = self.stats.lines, error = %e, "skipping undecodable line");
                }
            }
        }
    }

    /// Counters for everything read so far
    #[must_use]
    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Consume the reader, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<TestEvent, EventsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use similar_asserts::assert_eq;
    use std::io::{self, Read};

    #[test]
    fn test_decode_line_blank() {
        assert!(decode_line(b"").expect("Should decode").is_none());
        assert!(decode_line(b"   \t\r\n").expect("Should decode").is_none());
    }

    #[test]
    fn test_decode_line_with_surrounding_whitespace() {
        let event = decode_line(b"  {\"Action\":\"pass\"}\r\n")
            .expect("Should decode")
            .expect("Should be an event");
        assert_eq!(event.action, Some(Action::Pass));
    }

    #[test]
    fn test_decode_line_invalid() {
        let err = decode_line(b"not json").expect_err("Should fail");
        assert!(err.is_recoverable());
        assert!(decode_line(b"{\"Package\":").is_err());
        assert!(decode_line(b"42").is_err());
    }

    #[test]
    fn test_decode_line_invalid_utf8() {
        let err = decode_line(b"{\"Output\":\"\xff\xfe\"}").expect_err("Should fail");
        assert!(matches!(err, EventsError::Utf8(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_decode_line_trims_unicode_whitespace() {
        let line = "\u{a0}{\"Action\":\"fail\"}\u{2003}\n";
        let event = decode_line(line.as_bytes())
            .expect("Should decode")
            .expect("Should be an event");
        assert!(event.is_fail());
        assert!(decode_line("\u{a0}\u{3000}\n".as_bytes())
            .expect("Should decode")
            .is_none());
    }

    #[test]
    fn test_reader_skips_and_counts() {
        let input = concat!(
            "{\"Package\":\"p\",\"Action\":\"start\"}\n",
            "\n",
            "garbage\n",
            "{\"Package\":\"p\",\"Action\":\"pass\",\"Elapsed\":1}\n",
        );
        let mut reader = EventReader::new(input.as_bytes());
        let events: Vec<TestEvent> = reader
            .by_ref()
            .collect::<Result<_, _>>()
            .expect("Should read");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, Some(Action::Start));
        assert_eq!(events[1].action, Some(Action::Pass));
        assert_eq!(
            reader.stats(),
            ReaderStats {
                lines: 4,
                blank: 1,
                malformed: 1,
            }
        );
        assert_eq!(reader.stats().decoded(), 2);
    }

    #[test]
    fn test_reader_final_line_without_newline() {
        let mut reader = EventReader::new(&b"{\"Action\":\"run\"}"[..]);
        let event = reader.next_event().expect("Should read");
        assert!(event.is_some());
        assert!(reader.next_event().expect("Should read").is_none());
    }

    #[test]
    fn test_reader_empty_input() {
        let mut reader = EventReader::new(&b""[..]);
        assert!(reader.next().is_none());
        assert_eq!(reader.stats(), ReaderStats::default());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream closed"))
        }
    }

    #[test]
    fn test_reader_io_error_is_fused() {
        let mut reader = EventReader::new(io::BufReader::new(FailingReader));
        let first = reader.next().expect("Should yield the error");
        let err = first.expect_err("Should be an error");
        assert!(matches!(err, EventsError::Io(_)));
        assert!(!err.is_recoverable());
        assert!(reader.next().is_none());
    }
}
