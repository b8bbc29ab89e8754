// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger scopes: a named logging identity that bounds a region of deeper indentation.

use crate::context::with_current;
use crate::indent::{Indent, ListIndent};
use crate::logger::Logger;
use crate::stdout_logger::StdOutLogger;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeID(pub(crate) u64);

impl Display for ScopeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct ScopeInner {
    id: ScopeID,
    prefix: Option<String>,
    logger: Arc<dyn Logger>,
    indent: Arc<dyn Indent>,
}

/**
A logging identity: a prefix, a [Logger] and an [Indent] renderer.

Every log call is routed to the scope on top of the current context's scope stack.
Entering a scope pushes it, remembers the current [NestingPath](crate::NestingPath),
and opens one level, so lines logged inside start one level deeper than the caller.
Exiting restores the remembered path verbatim and pops the scope.

Scopes are cheap to clone (Arc-based) and compare by identity: two scopes built with
the same settings are still different scopes.

The same scope may be entered any number of times, also while it is already active.
Each entry remembers its own path, and exits are expected in reverse order.

```
use nestlog::{InMemoryLogger, LogContext, NumberedIndent, Scope};
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
let outer = Scope::builder("OUTER").indent(NumberedIndent).logger(logger.clone()).build();
let inner = Scope::builder("INNER").indent(NumberedIndent).logger(logger.clone()).build();
LogContext::reset(outer);

nestlog::log("before").unwrap();
{
    let _guard = inner.enter();
    nestlog::log("inside").unwrap();
}
nestlog::log("after").unwrap();

assert_eq!(
    logger.drain_lines(),
    vec![
        "[OUTER       ] 1. before",
        "[INNER       ] 1. 1. inside",
        "[OUTER       ] 2. after",
    ]
);
```
*/
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Scope {}

impl Hash for Scope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.inner.id)
            .field("prefix", &self.inner.prefix)
            .field("logger", &self.inner.logger)
            .finish_non_exhaustive()
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner.prefix {
            Some(prefix) => write!(f, "{} ({})", prefix, self.inner.id),
            None => write!(f, "unprefixed scope ({})", self.inner.id),
        }
    }
}

impl Scope {
    /// A scope with the given prefix, a [ListIndent] renderer and a [StdOutLogger].
    pub fn new(prefix: impl Into<String>) -> Scope {
        Self::builder(prefix).build()
    }

    pub fn builder(prefix: impl Into<String>) -> ScopeBuilder {
        ScopeBuilder {
            prefix: Some(prefix.into()),
            logger: None,
            indent: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ScopeID {
        self.inner.id
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.inner.prefix.as_deref()
    }

    #[inline]
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.inner.logger
    }

    #[inline]
    pub fn indent(&self) -> &dyn Indent {
        &*self.inner.indent
    }

    /**
    Pushes this scope onto the current context's stack and opens one level.

    Prefer [Scope::enter], which exits automatically. A manual push must be paired
    with [Scope::exit].
    */
    pub fn push(&self) {
        with_current(|context| context.push_frame(self.clone()));
    }

    /// Enters the scope until the returned guard is dropped.
    pub fn enter(&self) -> ScopeGuard {
        self.push();
        ScopeGuard {
            scope: self.clone(),
        }
    }

    /**
    Exits the scope: pops the top frame of the stack and restores the path it recorded.

    If the top frame belongs to another scope, a [ScopeWarning::Mismatch](crate::ScopeWarning::Mismatch)
    is reported and the exit proceeds anyway. If nothing was pushed, a
    [ScopeWarning::Unpushed](crate::ScopeWarning::Unpushed) is reported and nothing changes.
    Warnings go to this scope's logger.
    */
    pub fn exit(&self) {
        let warning = with_current(|context| context.pop_frame(self));
        if let Some(warning) = warning {
            self.inner.logger.warn(&warning);
        }
    }

    /// Runs `f` inside this scope.
    pub fn scoped<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }
}

/// Configures a [Scope].
pub struct ScopeBuilder {
    prefix: Option<String>,
    logger: Option<Arc<dyn Logger>>,
    indent: Option<Arc<dyn Indent>>,
}

impl ScopeBuilder {
    pub fn indent(mut self, indent: impl Indent + 'static) -> Self {
        let indent: Arc<dyn Indent> = Arc::new(indent);
        self.indent = Some(indent);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Lines of this scope are printed without the bracketed prefix.
    pub fn no_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    pub fn build(self) -> Scope {
        let logger: Arc<dyn Logger> = match self.logger {
            Some(logger) => logger,
            None => Arc::new(StdOutLogger::new()),
        };
        let indent: Arc<dyn Indent> = match self.indent {
            Some(indent) => indent,
            None => Arc::new(ListIndent),
        };
        Scope {
            inner: Arc::new(ScopeInner {
                id: ScopeID(SCOPE_ID.fetch_add(1, Ordering::Relaxed)),
                prefix: self.prefix,
                logger,
                indent,
            }),
        }
    }
}

impl std::fmt::Debug for ScopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeBuilder")
            .field("prefix", &self.prefix)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

/// Exits its scope when dropped. Created by [Scope::enter].
#[must_use = "the scope is exited as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    scope: Scope,
}

impl ScopeGuard {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.exit();
    }
}

/*
Boilerplate notes for Scope:

- Clone: Arc clone, the clone is the same scope
- PartialEq/Eq/Hash: identity.  Data equality would make two independently built "GLOBAL" scopes indistinguishable in mismatch warnings.
- Debug/Display: manual, the renderer is not Debug
- Default: not implemented, use root_scope()
- Send/Sync: yes, scopes move into isolated futures and threads
*/
