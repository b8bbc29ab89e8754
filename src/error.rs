// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors and warnings produced by the indentation engine.

use crate::path::NestingPath;

/// A protocol violation that aborts the log call or path operation that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NestingError {
    /// A deindent was attempted while the path held only its root counter,
    /// usually because of an extra leading `:`.
    #[error("can't deindent below the root level (path {path})")]
    StackUnderflow { path: NestingPath },
}

/**
A recoverable anomaly in scope bookkeeping.

Warnings never abort anything. They are handed to [crate::Logger::warn] on the sink of
the scope that noticed them, and the engine continues in a consistent state.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ScopeWarning {
    /// A scope exited while another scope was on top of the stack.
    /// The top frame was popped and its snapshot restored anyway.
    #[error("invalid log state: exiting scope {exiting} which is not the top-of-stack scope {top}")]
    Mismatch { exiting: String, top: String },
    /// A scope exited, but there was no entered frame left to pop.
    #[error("scope {scope} was not pushed onto the scope stack; nothing to restore")]
    Unpushed { scope: String },
    /// A nest guard went out of scope but its level had already been closed.
    #[error("nest guard dropped at the root level (path {path}); was the level closed twice?")]
    UnbalancedNest { path: NestingPath },
}
