// SPDX-License-Identifier: MIT OR Apache-2.0

//! The record handed to a [Logger](crate::Logger) for every emitted line.
//!
//! A `LogRecord` borrows everything it needs from the log call that produced it. Loggers
//! that want to keep a record around must copy out the parts they need, typically by
//! calling [LogRecord::line].
//!
//! ```
//! use nestlog::{LogRecord, NestingPath, NumberedIndent};
//!
//! let mut path = NestingPath::new();
//! path.advance();
//! let raw = "step:";
//! let record = LogRecord::new("step", &raw, Some("MAIN"), &path, &NumberedIndent);
//! assert_eq!(record.line(), "[MAIN        ] 1. step");
//! ```

use crate::indent::Indent;
use crate::path::NestingPath;
use std::fmt::{Debug, Display};

/// Width the prefix is padded to inside its brackets.
pub const PREFIX_WIDTH: usize = 12;

#[derive(Clone, Copy)]
pub struct LogRecord<'a> {
    text: &'a str,
    raw: &'a dyn Debug,
    prefix: Option<&'a str>,
    path: &'a NestingPath,
    indent: &'a dyn Indent,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        text: &'a str,
        raw: &'a dyn Debug,
        prefix: Option<&'a str>,
        path: &'a NestingPath,
        indent: &'a dyn Indent,
    ) -> Self {
        Self {
            text,
            raw,
            prefix,
            path,
            indent,
        }
    }

    /// The message text with the colon markers stripped.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The message exactly as it was passed to the log call.
    pub fn raw(&self) -> &'a dyn Debug {
        self.raw
    }

    /// The prefix override of the call if there was one, else the scope's prefix.
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// The nesting path after the line's counter was advanced.
    pub fn path(&self) -> &'a NestingPath {
        self.path
    }

    pub fn indent(&self) -> &'a dyn Indent {
        self.indent
    }

    /// The rendered indentation followed by the text, without the prefix.
    pub fn indented_text(&self) -> String {
        let mut out = self.indent.render(self.path);
        out.push_str(self.text);
        out
    }

    /**
    The standard line format, `[<prefix>] <indent><text>`.

    The prefix is left-aligned and padded to [PREFIX_WIDTH]. When there is no prefix the
    bracketed segment is omitted.
    */
    pub fn line(&self) -> String {
        match self.prefix {
            Some(prefix) if !prefix.is_empty() => {
                format!(
                    "[{:<width$}] {}",
                    prefix,
                    self.indented_text(),
                    width = PREFIX_WIDTH
                )
            }
            _ => self.indented_text(),
        }
    }
}

impl Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRecord")
            .field("text", &self.text)
            .field("raw", &self.raw)
            .field("prefix", &self.prefix)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Display for LogRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Clone/Copy: the record is a bundle of borrows, copying it is free
- Debug: manual, since the renderer is not Debug
- Display: the standard line format

NOT IMPLEMENTED:
- PartialEq/Eq/Hash: the raw message is only Debug, and comparing renderers is meaningless
- Default: a record always comes from a log call
- 'static storage: loggers copy out what they need
*/
