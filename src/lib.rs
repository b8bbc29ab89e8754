//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# nestlog

nestlog is a console logger that indents for you.

# The problem

Print-style logs of nested work are hard to read:

```text
connecting
resolving host
opening socket
connected
```

Which lines are part of which step?  The usual fix is to thread an indentation level
through every function, or to keep a global counter in sync by hand. Both break as soon as
a function returns early or two tasks log at the same time.

# The colon protocol

nestlog reads the indentation from the messages themselves. A trailing `:` opens a level,
a leading `:` closes one:

```rust
nestlog::log("connecting:").unwrap();
nestlog::log("resolving host").unwrap();
nestlog::log("opening socket").unwrap();
nestlog::log(":connected").unwrap();
```

```text
[GLOBAL      ]  * connecting
[GLOBAL      ]  => resolving host
[GLOBAL      ]  => opening socket
[GLOBAL      ]  * connected
```

Every line also advances a counter at its level. The counters of all levels form a
[NestingPath], which a pluggable [Indent] renders in front of the line; with
[NumberedIndent] the same calls print `1. connecting`, `1. 1. resolving host`,
`1. 2. opening socket`, `2. connected`.

See [protocol](crate::protocol) for the exact rules.

# Scopes

Lines are printed through the active [Scope]: a prefix, a [Logger] that writes the line,
and an [Indent]. Entering a scope makes it active and nests everything logged inside it
one level deeper:

```rust
use nestlog::{NumberedIndent, Scope};

let db = Scope::builder("DB").indent(NumberedIndent).build();
let _guard = db.enter();
nestlog::log("migrating").unwrap(); // [DB          ] 0. 1. migrating
```

# Functions

The [`#[logged]`](crate::logged) attribute logs a line whenever a function is called and
nests the function's own lines under it:

```rust
#[nestlog::logged("parsing {path}")]
fn parse(path: &str) -> usize {
    nestlog::log("reading").unwrap();
    path.len()
}
assert_eq!(parse("a.toml"), 6);
```

# Concurrency

The scope stack and the nesting path live in a per-thread [LogContext]. Futures that share
a thread, or work handed to another thread, should run in their own fork of that state, so
siblings don't advance each other's counters. See [context].
*/

mod error;
mod indent;
mod log_record;
mod logger;
mod path;
mod scope;
mod stdout_logger;
mod inmemory_logger;
mod fanout_logger;
mod macros;
pub mod context;
pub mod decorate;
pub mod protocol;
pub mod root_scope;

pub use context::{Isolated, LogContext, isolated};
pub use error::{NestingError, ScopeWarning};
pub use fanout_logger::FanoutLogger;
pub use indent::{Indent, ListIndent, NoIndent, NumberedIndent, SpaceIndent};
pub use inmemory_logger::InMemoryLogger;
pub use log_record::{LogRecord, PREFIX_WIDTH};
pub use logger::Logger;
pub use path::NestingPath;
pub use protocol::{
    Envelope, LogOptions, MARKER, Nest, NestGuard, log, log_envelope, log_keyed, log_with,
};
pub use scope::{Scope, ScopeBuilder, ScopeGuard, ScopeID};
pub use stdout_logger::StdOutLogger;

pub use nestlog_proc::logged;

#[doc(hidden)]
pub mod hidden {
    pub use crate::decorate::{logged_async_pre, logged_sync_pre};
}
extern crate self as nestlog;
