// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the testtint binary
//!
//! testtint takes no arguments. The only setting is the log filter, which is
//! normally supplied through the `TESTTINT_LOG` environment variable. Logging
//! is off unless that variable is set, because stderr carries failing test
//! output.

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "TESTTINT_LOG";

/// Filter used when no directive is configured
pub const DEFAULT_LOG_FILTER: &str = "off";

/// Color-code `go test -json` output read from stdin
///
/// Passing output is written to stdout. Failing output is written to stderr.
/// Exits with status 1 if any test failed.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "testtint")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Log filter directive, e.g. `debug` or `testtint=trace`
    #[arg(long, env = LOG_ENV, hide = true)]
    pub log_filter: Option<String>,
}

impl Config {
    /// The effective log filter directive
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Build the `EnvFilter` for the configured directive
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLogFilter` if the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        let directive = self.log_filter();
        EnvFilter::try_new(directive).map_err(|e| ConfigError::InvalidLogFilter {
            directive: directive.to_string(),
            message: e.to_string(),
        })
    }

    /// Install the global tracing subscriber
    ///
    /// Log lines go to stderr without ANSI colors so they cannot be confused
    /// with tinted test output.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is invalid or a subscriber is already set.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter()?)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init()
            .map_err(|e| ConfigError::LoggingInitFailed(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The log filter directive could not be parsed
    #[error("Invalid TESTTINT_LOG directive {directive:?}: {message}")]
    InvalidLogFilter {
        /// The rejected directive
        directive: String,
        /// Parser error message
        message: String,
    },

    /// The tracing subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),
}
