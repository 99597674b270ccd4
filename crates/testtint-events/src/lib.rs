// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testtint-events: `go test -json` event decoding for testtint
//!
//! This library crate decodes the newline-delimited JSON records written by
//! `go test -json` (test2json) into typed events, skipping lines that cannot
//! be decoded.
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//! use testtint_events::EventReader;
//!
//! let stdin = io::stdin().lock();
//! for event in EventReader::new(stdin) {
//!     let event = event.unwrap();
//!     println!("{} {:?}", event.key(), event.action);
//! }
//! ```

pub mod error;
pub mod event;
pub mod reader;

pub use error::EventsError;
pub use event::{Action, TestEvent, TestKey};
pub use reader::{EventReader, ReaderStats, decode_line};
