//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::ScopeWarning;
use crate::log_record::LogRecord;
use std::fmt::Debug;

/**
The emit sink of a [Scope](crate::Scope).

The engine decides what to print and where in the hierarchy; the logger decides how and
where the line ends up.
*/
pub trait Logger: Debug + Send + Sync {
    /**
        Writes one emitted line.

        No engine state is borrowed while this runs, so implementations may log themselves.
    */
    fn finish_log_record(&self, record: &LogRecord<'_>);

    /**
    Reports a recoverable scope bookkeeping problem.

    The default writes the warning to stderr.
    */
    fn warn(&self, warning: &ScopeWarning) {
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("nestlog warning: {warning}");
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!("nestlog warning: {warning}").into());
    }

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self) {}
}

/*
Boilerplate notes.

# Logger

I don't think Clone on Logger makes sense, so copy's out.
PartialEq and Eq are possible but it's a little unclear if we mean data equality or some kind of provenance-based thing.  Scopes compare by identity, so loggers don't need to.
Default is not necessarily sensible since who knows how the logger is constructed.
Send/Sync are required: a scope, and with it its logger, moves into isolated futures and threads.
*/
