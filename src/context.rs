// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-context logging state: the scope stack and the nesting path.
//!
//! Every thread owns one [`LogContext`], created lazily from the
//! [root scope](crate::root_scope::root_scope) the first time it logs. All log calls and
//! scope enter/exit operations on the thread mutate that context.
//!
//! # Isolation
//!
//! Concurrent units of work that share a thread (async tasks interleaved by an executor)
//! would corrupt each other's counters if they shared the thread's context. Wrap each unit
//! in [`Isolated`] so it starts from a private fork of the caller's state:
//!
//! ```rust
//! use nestlog::context::{Isolated, LogContext};
//! use nestlog::{InMemoryLogger, NumberedIndent, Scope};
//! use std::sync::Arc;
//!
//! async fn worker() {
//!     nestlog::log("working").unwrap();
//! }
//!
//! # async fn example() {
//! let logger = Arc::new(InMemoryLogger::new());
//! LogContext::reset(Scope::builder("MAIN").indent(NumberedIndent).logger(logger.clone()).build());
//! nestlog::log("spawning:").unwrap();
//!
//! // each worker counts from 1 at depth 2, no matter how the two interleave
//! Isolated::new(worker()).await;
//! Isolated::new(worker()).await;
//! assert_eq!(
//!     logger.drain_lines(),
//!     vec![
//!         "[MAIN        ] 1. spawning",
//!         "[MAIN        ] 1. 1. working",
//!         "[MAIN        ] 1. 1. working",
//!     ]
//! );
//! # }
//! ```
//!
//! A fork keeps only the caller's current scope, not the frames below it, and a deep copy
//! of the caller's path. Nothing the isolated unit does is visible to the caller.
//!
//! For threads, [`isolated`] wraps a closure the same way.

mod context_impl;
mod isolated;


pub use context_impl::LogContext;
pub(crate) use context_impl::with_current;
pub use isolated::{Isolated, isolated};
