// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
The colon protocol: how a log call turns into indentation.

A log message may carry a [MARKER] (`:`) at either end:

* a **leading** marker closes the current level *before* the line is emitted,
* a **trailing** marker opens a new level *after* the line is emitted.

```text
log("connecting:")       [MAIN        ] 1. connecting
log("resolving host")    [MAIN        ] 1. 1. resolving host
log("opening socket")    [MAIN        ] 1. 2. opening socket
log(":connected")        [MAIN        ] 2. connected
```

One leading and one trailing marker are stripped from the printed text. If the result is
empty or a single space (`":"`, `"::"`, `": :"`), nothing is printed and no counter
moves; the message is a pure control message.

A message with both markers, `":retrying:"`, closes, prints at the outer level, and
opens again: the depth is unchanged but the inner counter restarts.

Every log call returns a [Nest] handle. Entering it nests a block under the line
explicitly, as an alternative to a trailing marker.
*/

use crate::context::{LogContext, with_current};
use crate::error::{NestingError, ScopeWarning};
use crate::log_record::LogRecord;
use crate::scope::Scope;
use std::borrow::Cow;
use std::fmt::Debug;

/// The character that opens (trailing) or closes (leading) a nesting level.
pub const MARKER: char = ':';

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogOptions<'a> {
    /// Replaces the scope's prefix for this line.
    pub prefix: Option<&'a str>,
    /// Emits the line without advancing the counter. Markers still open and close levels.
    pub dont_advance: bool,
}

/**
A message on its way into the protocol: the raw message, the string the protocol
inspects, and the per-call options.

The string is computed once, when the envelope is built.

```
use nestlog::Envelope;

#[derive(Debug)]
struct Request { id: u32 }

let request = Request { id: 7 };
let envelope = Envelope::keyed(&request, |r| format!("request {}:", r.id)).dont_advance();
assert_eq!(envelope.key(), "request 7:");
```
*/
#[derive(Debug, Clone)]
pub struct Envelope<'a> {
    key: Cow<'a, str>,
    raw: &'a dyn Debug,
    options: LogOptions<'a>,
}

impl<'a> Envelope<'a> {
    /// An envelope whose protocol string is the message itself.
    pub fn new<M: AsRef<str> + Debug>(raw: &'a M) -> Self {
        Self {
            key: Cow::Borrowed(raw.as_ref()),
            raw,
            options: LogOptions::default(),
        }
    }

    /**
    An envelope whose protocol string is computed by `key`.

    A panic in `key` propagates to the caller.
    */
    pub fn keyed<M: Debug>(raw: &'a M, key: impl FnOnce(&M) -> String) -> Self {
        Self {
            key: Cow::Owned(key(raw)),
            raw,
            options: LogOptions::default(),
        }
    }

    pub fn options(mut self, options: LogOptions<'a>) -> Self {
        self.options = options;
        self
    }

    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.options.prefix = Some(prefix);
        self
    }

    pub fn dont_advance(mut self) -> Self {
        self.options.dont_advance = true;
        self
    }

    /// The string the protocol inspects.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Removes one leading and one trailing [MARKER].
pub fn strip_markers(key: &str) -> &str {
    let key = key.strip_prefix(MARKER).unwrap_or(key);
    key.strip_suffix(MARKER).unwrap_or(key)
}

impl Scope {
    /**
    Runs the colon protocol for `envelope` with this scope's identity, on the current
    thread's path.

    Usually called through [crate::log], which picks the active scope.

    # Errors

    [NestingError::StackUnderflow] if a leading marker would close the root level. In
    that case nothing is emitted and no level is opened.
    */
    pub fn log_envelope(&self, envelope: Envelope<'_>) -> Result<Nest, NestingError> {
        let key = envelope.key();
        let closes = key.starts_with(MARKER);
        let opens = key.ends_with(MARKER);

        if closes {
            with_current(|context| context.path_mut().close())?;
        }

        let text = strip_markers(key);
        if !text.is_empty() && text != " " {
            let path = with_current(|context| {
                let path = context.path_mut();
                if !envelope.options.dont_advance {
                    path.advance();
                }
                path.clone()
            });
            let prefix = envelope.options.prefix.or(self.prefix());
            let record = LogRecord::new(text, envelope.raw, prefix, &path, self.indent());
            self.logger().finish_log_record(&record);
        }

        if opens {
            with_current(|context| context.path_mut().open());
        }
        Ok(Nest { opened: opens })
    }

    /// Logs `message` with this scope's identity.
    pub fn log<M: AsRef<str> + Debug>(&self, message: M) -> Result<Nest, NestingError> {
        self.log_envelope(Envelope::new(&message))
    }

    /// Logs `message` with this scope's identity and the given options.
    pub fn log_with<M: AsRef<str> + Debug>(
        &self,
        message: M,
        options: LogOptions<'_>,
    ) -> Result<Nest, NestingError> {
        self.log_envelope(Envelope::new(&message).options(options))
    }
}

/**
Logs `message` with the active scope.

```
use nestlog::{InMemoryLogger, LogContext, NumberedIndent, Scope};
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
LogContext::reset(Scope::builder("APP").indent(NumberedIndent).logger(logger.clone()).build());

nestlog::log("step:").unwrap();
nestlog::log("child").unwrap();
nestlog::log(":done").unwrap();
assert_eq!(
    logger.drain_lines(),
    vec!["[APP         ] 1. step", "[APP         ] 1. 1. child", "[APP         ] 2. done"]
);
```

# Errors

[NestingError::StackUnderflow] if `message` starts with [MARKER] at the root level.
*/
pub fn log<M: AsRef<str> + Debug>(message: M) -> Result<Nest, NestingError> {
    LogContext::current_scope().log(message)
}

/// Logs `message` with the active scope and the given options.
pub fn log_with<M: AsRef<str> + Debug>(
    message: M,
    options: LogOptions<'_>,
) -> Result<Nest, NestingError> {
    LogContext::current_scope().log_with(message, options)
}

/// Logs a message of any type, using `key` to turn it into the protocol string.
pub fn log_keyed<M: Debug>(
    message: M,
    key: impl FnOnce(&M) -> String,
) -> Result<Nest, NestingError> {
    LogContext::current_scope().log_envelope(Envelope::keyed(&message, key))
}

/// Logs a prepared envelope with the active scope.
pub fn log_envelope(envelope: Envelope<'_>) -> Result<Nest, NestingError> {
    LogContext::current_scope().log_envelope(envelope)
}

/**
The handle returned by every log call.

Dropping a `Nest` does nothing. [Nest::enter] nests the following code under the line
until the returned guard is dropped:

```
use nestlog::{InMemoryLogger, LogContext, NumberedIndent, Scope};
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
LogContext::reset(Scope::builder("APP").indent(NumberedIndent).logger(logger.clone()).build());

{
    let _nested = nestlog::log("loading").unwrap().enter();
    nestlog::log("config").unwrap();
}
nestlog::log("ready").unwrap();
assert_eq!(
    logger.drain_lines(),
    vec!["[APP         ] 1. loading", "[APP         ] 1. 1. config", "[APP         ] 2. ready"]
);
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nest {
    opened: bool,
}

impl Nest {
    /// Whether the log call already opened a level (its message ended with [MARKER]).
    pub fn opened(&self) -> bool {
        self.opened
    }

    /**
    Nests what follows under the logged line until the guard is dropped.

    If the message ended with [MARKER] the level is already open and entering changes
    nothing; otherwise entering opens it.
    */
    pub fn enter(self) -> NestGuard {
        if !self.opened {
            with_current(|context| context.path_mut().open());
        }
        NestGuard { _private: () }
    }

    /// Closes the level opened by the log call.
    pub fn exit(self) -> Result<(), NestingError> {
        with_current(|context| context.path_mut().close())
    }
}

/// Closes a nesting level when dropped. Created by [Nest::enter].
#[must_use = "the level is closed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct NestGuard {
    _private: (),
}

impl Drop for NestGuard {
    fn drop(&mut self) {
        if let Err(NestingError::StackUnderflow { path }) =
            with_current(|context| context.path_mut().close())
        {
            LogContext::current_scope()
                .logger()
                .warn(&ScopeWarning::UnbalancedNest { path });
        }
    }
}
