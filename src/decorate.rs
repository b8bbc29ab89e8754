// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Logging a line on behalf of a function call.

A function can announce itself with a message that is either fixed or derived from its
arguments. Most code uses the [`#[logged]`](crate::logged) attribute; the functions here are
what it builds on, and can be called directly for closures and futures.

```
use nestlog::decorate::{CallArgs, MessageSource, call_logged};
use nestlog::{InMemoryLogger, LogContext, LogOptions, NumberedIndent, Scope};
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
LogContext::reset(Scope::builder("APP").indent(NumberedIndent).logger(logger.clone()).build());

let source = MessageSource::derived(|args| format!("resize to {}", args.get("width").unwrap_or("?")));
let args = CallArgs::new().arg("width", &640);
let area = call_logged(&source, &args, LogOptions::default(), || {
    nestlog::log("computing").unwrap();
    640 * 480
})
.unwrap();

assert_eq!(area, 307200);
assert_eq!(
    logger.drain_lines(),
    vec!["[APP         ] 1. resize to 640", "[APP         ] 1. 1. computing"]
);
```
*/

use crate::error::NestingError;
use crate::protocol::{LogOptions, NestGuard, log_with};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

/// The actual arguments of a call, by parameter name, formatted with `Debug`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CallArgs {
    args: Vec<(&'static str, String)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument. A later argument with the same name shadows an earlier one.
    pub fn arg<T: Debug + ?Sized>(mut self, name: &'static str, value: &T) -> Self {
        self.args.push((name, format!("{:?}", value)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Arguments in call order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.args.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Where the message of a logged call comes from.
#[derive(Clone)]
pub enum MessageSource {
    /// A fixed message.
    Literal(String),
    /// A message computed from the call's arguments.
    Derived(Arc<dyn Fn(&CallArgs) -> String + Send + Sync>),
}

impl MessageSource {
    pub fn literal(message: impl Into<String>) -> Self {
        MessageSource::Literal(message.into())
    }

    pub fn derived(f: impl Fn(&CallArgs) -> String + Send + Sync + 'static) -> Self {
        MessageSource::Derived(Arc::new(f))
    }

    /// Produces the message for one call.
    pub fn resolve(&self, args: &CallArgs) -> String {
        match self {
            MessageSource::Literal(message) => message.clone(),
            MessageSource::Derived(f) => f(args),
        }
    }
}

impl Debug for MessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSource::Literal(message) => f.debug_tuple("Literal").field(message).finish(),
            MessageSource::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for MessageSource {
    fn from(message: &str) -> Self {
        MessageSource::literal(message)
    }
}

impl From<String> for MessageSource {
    fn from(message: String) -> Self {
        MessageSource::Literal(message)
    }
}

/**
Logs the message of `source`, then runs `f` nested under that line.

The nesting ends when `f` returns (or unwinds).
*/
pub fn call_logged<R>(
    source: &MessageSource,
    args: &CallArgs,
    options: LogOptions<'_>,
    f: impl FnOnce() -> R,
) -> Result<R, NestingError> {
    let message = source.resolve(args);
    let _nested = log_with(message, options)?.enter();
    Ok(f())
}

/**
Logs the message of `source`, then awaits `fut`.

The line is logged when the returned future is first polled. The awaited work is not
nested under the line, and nothing is done about concurrency; wrap the returned future in
[Isolated](crate::context::Isolated) to give it its own counters.
*/
pub async fn call_logged_async<F: Future>(
    source: &MessageSource,
    args: &CallArgs,
    options: LogOptions<'_>,
    fut: F,
) -> Result<F::Output, NestingError> {
    let message = source.resolve(args);
    log_with(message, options)?;
    Ok(fut.await)
}

/// Entry point of synchronous `#[logged]` functions.
///
/// # Panics
///
/// If the message violates the nesting protocol, since the decorated function has no way
/// to return the error.
#[doc(hidden)]
pub fn logged_sync_pre(
    source: &MessageSource,
    args: &CallArgs,
    options: LogOptions<'_>,
) -> NestGuard {
    match log_with(source.resolve(args), options) {
        Ok(nest) => nest.enter(),
        Err(e) => panic!("{e}"),
    }
}

/// Entry point of `async` `#[logged]` functions.
///
/// # Panics
///
/// As [logged_sync_pre].
#[doc(hidden)]
pub fn logged_async_pre(source: &MessageSource, args: &CallArgs, options: LogOptions<'_>) {
    if let Err(e) = log_with(source.resolve(args), options) {
        panic!("{e}");
    }
}
