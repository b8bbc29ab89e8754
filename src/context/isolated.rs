// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolation boundaries for concurrent units of work.

use std::future::Future;
use std::mem::ManuallyDrop;
use std::pin::Pin;
use std::task::Poll;

use super::context_impl::LogContext;

/// Installs a context for as long as it lives, then swaps the previous one back.
///
/// Swapping back happens in `drop`, so a panicking poll does not leave the isolated
/// state behind on the thread.
struct Installed<'a> {
    context: &'a mut LogContext,
}

impl<'a> Installed<'a> {
    fn new(context: &'a mut LogContext) -> Self {
        LogContext::swap_current(context);
        Self { context }
    }
}

impl Drop for Installed<'_> {
    fn drop(&mut self) {
        LogContext::swap_current(self.context);
    }
}

/// A [`Future`] wrapper that runs its future in a private [`LogContext`].
///
/// The context is forked from the caller when the wrapper is created. Before each poll
/// the wrapper installs its context on the polling thread; afterwards it puts the
/// thread's own context back. As a result:
///
/// - counters inside the future start from the caller's position but never leak back,
/// - sibling futures polled on the same thread do not see each other's counters,
/// - the future may move between threads, its context moves with it.
///
/// Cancelling (dropping) the future discards its context. The future is dropped with
/// its own context installed, so guards it holds across an `.await` ([`ScopeGuard`](crate::ScopeGuard),
/// [`NestGuard`](crate::NestGuard)) unwind the private state and never the caller's.
///
/// # Examples
///
/// ```rust
/// use nestlog::context::Isolated;
///
/// async fn job(n: u32) -> u32 {
///     nestlog::log(format!("job {n}:")).unwrap();
///     nestlog::log("step").unwrap();
///     n
/// }
///
/// # async fn example() {
/// // both jobs log "job n" at the same depth, with their steps nested under them
/// let a = Isolated::new(job(1));
/// let b = Isolated::new(job(2));
/// assert_eq!(a.await + b.await, 3);
/// # }
/// ```
pub struct Isolated<F> {
    context: LogContext,
    //dropped by hand, inside `context`
    fut: ManuallyDrop<F>,
}

impl<F> Isolated<F> {
    /// Wraps `fut` in a fork of the current thread's context.
    pub fn new(fut: F) -> Self {
        Self::with_context(LogContext::fork_current(), fut)
    }

    /// Wraps `fut` in the given context.
    pub fn with_context(context: LogContext, fut: F) -> Self {
        Self {
            context,
            fut: ManuallyDrop::new(fut),
        }
    }

    /// The wrapped future's context as of its last poll.
    pub fn context(&self) -> &LogContext {
        &self.context
    }
}

impl<F> Future for Isolated<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        //safety: the context is never pinned, and the future is never moved out of self;
        //it is only ever dropped in place, by our Drop
        let (context, fut) = unsafe {
            let d = self.get_unchecked_mut();
            (&mut d.context, Pin::new_unchecked(&mut *d.fut))
        };
        let _installed = Installed::new(context);
        fut.poll(cx)
    }
}

impl<F> Drop for Isolated<F> {
    fn drop(&mut self) {
        let _installed = Installed::new(&mut self.context);
        //safety: `fut` is never touched again, and dropping in place keeps the pin promise
        unsafe { ManuallyDrop::drop(&mut self.fut) };
    }
}

impl<F> std::fmt::Debug for Isolated<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Isolated")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/**
Wraps a closure so it runs in a fork of the current context.

The fork is taken when `isolated` is called, so call it on the parent thread and run
the returned closure wherever the work happens, typically a new thread. The running
thread's own context is restored when the closure returns.

```rust
use nestlog::context::isolated;

nestlog::log("spawning:").unwrap();
let handle = std::thread::spawn(isolated(|| {
    // nested under "spawning", with its own counters
    nestlog::log("in the thread").unwrap();
}));
handle.join().unwrap();
```
*/
pub fn isolated<F, R>(f: F) -> impl FnOnce() -> R + Send
where
    F: FnOnce() -> R + Send,
{
    let mut context = LogContext::fork_current();
    move || {
        let _installed = Installed::new(&mut context);
        f()
    }
}
