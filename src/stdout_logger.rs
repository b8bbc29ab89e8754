// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use crate::logger::Logger;

/**
A reference logger that writes each line to stdout.

[StdOutLogger::new] writes the full [LogRecord::line], `[<prefix>] <indent><text>`.
[StdOutLogger::prefixless] drops the bracketed prefix segment.

Output failures (a closed or full stdout) are ignored: the line is lost and the program
keeps running.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdOutLogger {
    show_prefix: bool,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone/Copy: derived, the logger is a single flag
// - PartialEq/Eq/Hash: derived, two loggers with the same flag behave identically
// - Default: the prefixed variant
// - Display: NOT implemented - no meaningful string representation for a stdout logger
// - Send/Sync: Automatically implemented

impl Default for StdOutLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StdOutLogger {
    pub const fn new() -> Self {
        Self { show_prefix: true }
    }

    pub const fn prefixless() -> Self {
        Self { show_prefix: false }
    }

    fn format(&self, record: &LogRecord<'_>) -> String {
        if self.show_prefix {
            record.line()
        } else {
            record.indented_text()
        }
    }
}

impl Logger for StdOutLogger {
    fn finish_log_record(&self, record: &LogRecord<'_>) {
        let line = self.format(record);
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stdout().lock();
            let _ = lock.write_all(line.as_bytes());
            let _ = lock.write_all(b"\n");
        }
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&line.into());
        }
    }

    fn prepare_to_die(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let _ = std::io::stdout().flush();
        }
    }
}
