// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testtint: color-code `go test -json` output
//!
//! Reads test2json events from stdin. Passing output is written to stdout in
//! grey, failing output to stderr in red or yellow. Exits with status 1 if any
//! test failed.
//!
//! ```text
//! go test -json ./... | testtint
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use testtint::config::Config;
use testtint::router::{Router, RunOutcome};
use testtint_events::EventReader;

/// Exit status for configuration errors, matching clap's usage errors
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = config.init_logging() {
        eprintln!("testtint: {e}");
        return ExitCode::from(USAGE_ERROR);
    }

    match run() {
        Ok(outcome) => {
            debug!(?outcome, "done");
            outcome.exit_code()
        }
        Err(e) => {
            // Logging is usually off, so the error is always printed as well
            error!("{e:#}");
            eprintln!("testtint: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<RunOutcome> {
    let mut reader = EventReader::new(io::stdin().lock());
    let mut router = Router::new(io::stdout(), io::stderr());
    router
        .run(&mut reader)
        .context("Failed to route test events")
}
