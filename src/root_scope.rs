// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide root scope.
//!
//! Every thread's [LogContext](crate::LogContext) is created lazily, the first time the
//! thread logs or enters a scope. A new context starts with the root scope as the only
//! frame of its stack, so log calls made outside of any scope go to the root scope.
//!
//! # Default Behavior
//!
//! Until configured, the root scope has the prefix [ROOT_PREFIX], a
//! [ListIndent] renderer and a [StdOutLogger]:
//!
//! ```text
//! [GLOBAL      ]  * hello
//! ```
//!
//! # Configuration
//!
//! ```
//! use nestlog::root_scope::{root_scope, set_root_scope};
//! use nestlog::{LogContext, NumberedIndent, Scope};
//!
//! let app = Scope::builder("APP").indent(NumberedIndent).build();
//! set_root_scope(app.clone());
//! assert_eq!(root_scope(), app);
//!
//! // threads that already logged keep their context; start this one over
//! LogContext::reset(root_scope());
//! nestlog::log("hello").unwrap(); // [APP         ] 1. hello
//! ```
//!
//! Configure the root scope early, before other threads start logging. Contexts that
//! already exist are not affected by [set_root_scope].

use crate::indent::ListIndent;
use crate::scope::Scope;
use crate::stdout_logger::StdOutLogger;
use std::sync::{Arc, Mutex, OnceLock};

/// Prefix of the default root scope.
pub const ROOT_PREFIX: &str = "GLOBAL";

static ROOT_SCOPE: OnceLock<Mutex<Scope>> = OnceLock::new();

fn default_root_scope() -> Scope {
    Scope::builder(ROOT_PREFIX)
        .indent(ListIndent)
        .logger(Arc::new(StdOutLogger::new()))
        .build()
}

fn root_cell() -> &'static Mutex<Scope> {
    ROOT_SCOPE.get_or_init(|| Mutex::new(default_root_scope()))
}

/// The scope new contexts start with.
pub fn root_scope() -> Scope {
    root_cell()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Replaces the scope new contexts start with.
pub fn set_root_scope(scope: Scope) {
    *root_cell().lock().unwrap_or_else(|e| e.into_inner()) = scope;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LogContext;
    use crate::inmemory_logger::InMemoryLogger;
    use std::sync::Mutex;

    static TEST_ROOT_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn default_root_is_global() {
        let _guard = TEST_ROOT_GUARD.lock().unwrap();
        let original = root_scope();
        set_root_scope(default_root_scope());
        assert_eq!(root_scope().prefix(), Some(ROOT_PREFIX));
        set_root_scope(original);
    }

    #[test]
    fn new_threads_start_at_root() {
        let _guard = TEST_ROOT_GUARD.lock().unwrap();
        let original = root_scope();
        let logger = Arc::new(InMemoryLogger::new());
        let scope = Scope::builder("ROOT").logger(logger.clone()).build();
        set_root_scope(scope.clone());

        let seen = std::thread::spawn(move || {
            crate::log("from a fresh thread").unwrap();
            (LogContext::current_scope(), LogContext::current().stack_depth())
        })
        .join()
        .expect("Thread should complete successfully");

        assert_eq!(seen.0, scope);
        assert_eq!(seen.1, 1);
        assert_eq!(logger.drain_logs(), "[ROOT        ]  * from a fresh thread");
        set_root_scope(original);
    }
}
