// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testtint library
//!
//! This module exports the routing core of the testtint binary for use in
//! integration tests, benchmarks, and other tools.

pub mod config;
pub mod palette;
pub mod router;

pub use palette::{Stream, Tint};
pub use router::{RouteError, RouteStats, Router, RunOutcome};
