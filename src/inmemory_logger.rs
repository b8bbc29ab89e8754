// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! An in-memory [Logger] for tests and for inspecting output programmatically.
//!
//! `InMemoryLogger` keeps every emitted line (in the standard [LogRecord::line] format)
//! and every [ScopeWarning] it receives. Share it between scopes with an `Arc`.

use crate::error::ScopeWarning;
use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::sync::{Mutex, MutexGuard};

/// An in-memory logger that stores lines and warnings.
///
/// # Example
///
/// ```rust
/// use nestlog::{InMemoryLogger, LogContext, NumberedIndent, Scope};
/// use std::sync::Arc;
///
/// let logger = Arc::new(InMemoryLogger::new());
/// let scope = Scope::builder("TEST")
///     .indent(NumberedIndent)
///     .logger(logger.clone())
///     .build();
/// LogContext::reset(scope);
///
/// nestlog::log("step:").unwrap();
/// nestlog::log("child").unwrap();
///
/// assert_eq!(
///     logger.drain_lines(),
///     vec!["[TEST        ] 1. step", "[TEST        ] 1. 1. child"]
/// );
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    lines: Vec<String>,
    warnings: Vec<ScopeWarning>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived for diagnostic purposes and required by Logger trait
// - Default: Derived, empty buffers
// - Clone: NOT implemented - share it with Arc instead
// - PartialEq/Eq/Hash: NOT implemented - equality semantics unclear for loggers
// - Send/Sync: Automatically implemented due to Mutex usage (required for Logger trait)

impl InMemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        //a panicking test thread must not hide the logs of the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns all lines, clearing the buffer.
    pub fn drain_lines(&self) -> Vec<String> {
        std::mem::take(&mut self.state().lines)
    }

    /// Returns all lines joined by newlines, clearing the buffer.
    pub fn drain_logs(&self) -> String {
        self.drain_lines().join("\n")
    }

    /// Returns all warnings, clearing the warning buffer.
    pub fn drain_warnings(&self) -> Vec<ScopeWarning> {
        std::mem::take(&mut self.state().warnings)
    }

    /// Writes all buffered lines to stderr and clears the buffer.
    pub fn drain_to_console(&self) {
        for line in self.drain_lines() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&line.into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", line);
        }
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: &LogRecord<'_>) {
        let line = record.line();
        self.state().lines.push(line);
    }

    fn warn(&self, warning: &ScopeWarning) {
        self.state().warnings.push(warning.clone());
    }
}
