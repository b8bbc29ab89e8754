// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderers that turn a [NestingPath] into the prefix printed before each line.
//!
//! Renderers are stateless and chosen per [Scope](crate::Scope). Four are built in:
//!
//! | Renderer           | `[1]`   | `[2, 1]`    | `[1, 1, 3]`  |
//! |--------------------|---------|-------------|--------------|
//! | [NoIndent]         | `""`    | `""`        | `""`         |
//! | [SpaceIndent]      | `""`    | `" "`       | `"  "`       |
//! | [NumberedIndent]   | `"1. "` | `"2. 1. "`  | `"1. 1. 3. "`|
//! | [ListIndent]       | `" * "` | `" => "`    | `"  -> "`    |
//!
//! Any `Fn(&NestingPath) -> String` closure can be used as a renderer as well.

use crate::path::NestingPath;

pub trait Indent: Send + Sync {
    /// Renders the prefix for a line emitted at `path`.
    fn render(&self, path: &NestingPath) -> String;
}

impl<F> Indent for F
where
    F: Fn(&NestingPath) -> String + Send + Sync,
{
    fn render(&self, path: &NestingPath) -> String {
        self(path)
    }
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoIndent;

impl Indent for NoIndent {
    fn render(&self, _path: &NestingPath) -> String {
        String::new()
    }
}

/// Repeats a character once per level below the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceIndent {
    ch: char,
}

impl SpaceIndent {
    pub const fn new(ch: char) -> Self {
        Self { ch }
    }
}

impl Default for SpaceIndent {
    fn default() -> Self {
        Self::new(' ')
    }
}

impl Indent for SpaceIndent {
    fn render(&self, path: &NestingPath) -> String {
        std::iter::repeat_n(self.ch, path.depth() - 1).collect()
    }
}

/// Writes every counter of the path, `"2. 1. "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberedIndent;

impl Indent for NumberedIndent {
    fn render(&self, path: &NestingPath) -> String {
        let mut out = String::new();
        for counter in path.counters() {
            out.push_str(&counter.to_string());
            out.push_str(". ");
        }
        out
    }
}

/// Bullet list style: `" * "`, then `" => "`, then indented arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListIndent;

impl Indent for ListIndent {
    fn render(&self, path: &NestingPath) -> String {
        match path.depth() {
            1 => " * ".to_string(),
            2 => " => ".to_string(),
            depth => format!("{}-> ", " ".repeat(depth - 1)),
        }
    }
}
