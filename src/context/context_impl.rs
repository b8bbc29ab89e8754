// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core LogContext implementation.

use crate::error::ScopeWarning;
use crate::path::NestingPath;
use crate::root_scope::root_scope;
use crate::scope::Scope;
use std::cell::RefCell;

/// One entry of the scope stack.
///
/// `snapshot` is the path at the time the scope was entered. The base frame of a
/// context has none and is never popped.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) scope: Scope,
    pub(crate) snapshot: Option<NestingPath>,
}

/**
The logging state of one execution context: a stack of scopes and a nesting path.

The top of the stack is the active scope, which receives every log call. The path
holds the sibling counters for the current position in the hierarchy.

Each thread has a current `LogContext`, which the free functions of this crate
([`log`](crate::log), [`Scope::enter`], ...) operate on. A `LogContext` value obtained
with [`LogContext::current`] is a copy: changing it does nothing until it is installed
with [`LogContext::set_current`].

# Examples

```rust
use nestlog::context::LogContext;
use nestlog::Scope;

let scope = Scope::new("WORKER");
LogContext::reset(scope.clone());
assert_eq!(LogContext::current_scope(), scope);
assert_eq!(LogContext::current_path().counters(), &[0]);
```
*/
#[derive(Debug, Clone)]
pub struct LogContext {
    stack: Vec<Frame>,
    path: NestingPath,
}

thread_local! {
    static CONTEXT: RefCell<Option<LogContext>> = const { RefCell::new(None) };
}

/**
Runs `f` on the thread's current context, creating it from the root scope if needed.

The borrow lasts only for `f`. Loggers must never be called from inside `f`, since they
may log themselves.
*/
pub(crate) fn with_current<R>(f: impl FnOnce(&mut LogContext) -> R) -> R {
    CONTEXT.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let context = borrow.get_or_insert_with(|| LogContext::new(root_scope()));
        f(context)
    })
}

impl LogContext {
    /// A fresh context: `scope` as the only frame, path `[0]`.
    pub fn new(scope: Scope) -> LogContext {
        LogContext {
            stack: vec![Frame {
                scope,
                snapshot: None,
            }],
            path: NestingPath::new(),
        }
    }

    /// Returns a copy of the current thread's context.
    pub fn current() -> LogContext {
        with_current(|context| context.clone())
    }

    /// Replaces the current thread's context.
    pub fn set_current(self) {
        with_current(|context| *context = self);
    }

    /**
    Replaces the current thread's context with a fresh one for `scope`.

    ```rust
    use nestlog::context::LogContext;
    use nestlog::root_scope::root_scope;

    // start over from the process-wide root scope
    LogContext::reset(root_scope());
    ```
    */
    pub fn reset(scope: Scope) {
        LogContext::new(scope).set_current();
    }

    /// The active scope of the current thread.
    pub fn current_scope() -> Scope {
        with_current(|context| context.scope().clone())
    }

    /// A copy of the current thread's nesting path.
    pub fn current_path() -> NestingPath {
        with_current(|context| context.path.clone())
    }

    /// Forks the current thread's context, see [`LogContext::fork`].
    pub fn fork_current() -> LogContext {
        with_current(|context| context.fork())
    }

    /**
    An independent copy for a concurrent unit of work.

    The fork's stack holds only this context's active scope (the frames below it are
    dropped), and its path is a deep copy of this context's path.
    */
    pub fn fork(&self) -> LogContext {
        LogContext {
            stack: vec![Frame {
                scope: self.scope().clone(),
                snapshot: None,
            }],
            path: self.path.clone(),
        }
    }

    /// The active scope.
    pub fn scope(&self) -> &Scope {
        //invariant: the base frame is never popped
        &self.stack[self.stack.len() - 1].scope
    }

    pub fn path(&self) -> &NestingPath {
        &self.path
    }

    /// Number of frames on the scope stack, including the base frame.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// The scopes on the stack, bottom first.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.stack.iter().map(|frame| &frame.scope)
    }

    pub(crate) fn path_mut(&mut self) -> &mut NestingPath {
        &mut self.path
    }

    pub(crate) fn push_frame(&mut self, scope: Scope) {
        self.stack.push(Frame {
            scope,
            snapshot: Some(self.path.clone()),
        });
        self.path.open();
    }

    /**
    Pops the top frame on behalf of `exiting` and restores the frame's snapshot.

    Returns a warning when the top frame belongs to a different scope (the pop happens
    anyway), or when only the base frame is left (nothing happens).
    */
    pub(crate) fn pop_frame(&mut self, exiting: &Scope) -> Option<ScopeWarning> {
        if self.stack.len() <= 1 {
            return Some(ScopeWarning::Unpushed {
                scope: exiting.to_string(),
            });
        }
        let frame = self.stack.pop()?;
        let mut warning = None;
        if frame.scope != *exiting {
            warning = Some(ScopeWarning::Mismatch {
                exiting: exiting.to_string(),
                top: frame.scope.to_string(),
            });
        }
        match frame.snapshot {
            Some(snapshot) => self.path = snapshot,
            None => {
                warning.get_or_insert(ScopeWarning::Unpushed {
                    scope: exiting.to_string(),
                });
            }
        }
        warning
    }

    /// Exchanges `other` with the current thread's context.
    pub(crate) fn swap_current(other: &mut LogContext) {
        with_current(|context| std::mem::swap(context, other));
    }
}
