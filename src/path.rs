// SPDX-License-Identifier: MIT OR Apache-2.0

//! The nesting path: the counters that describe where the next log line goes.

use crate::error::NestingError;
use std::fmt::Display;

/**
An ordered list of sibling counters, one per nesting level.

The last counter is the number of lines emitted so far at the current depth. Earlier
counters are the frozen counters of the enclosing levels at the time they were opened.

A path is never empty. [NestingPath::close] refuses to remove the root counter.

```
use nestlog::NestingPath;

let mut path = NestingPath::new();
path.advance();
path.open();
path.advance();
assert_eq!(path.counters(), &[1, 1]);
path.close().unwrap();
assert_eq!(path.counters(), &[1]);
assert!(path.close().is_err());
```
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestingPath {
    counters: Vec<u64>,
}

impl NestingPath {
    /// A root-level path, `[0]`.
    pub fn new() -> Self {
        Self { counters: vec![0] }
    }

    /// Increments the counter of the current level.
    #[inline]
    pub fn advance(&mut self) {
        //invariant: counters is never empty
        if let Some(last) = self.counters.last_mut() {
            *last += 1;
        }
    }

    /// Starts a new, deeper level whose counter is `0`.
    #[inline]
    pub fn open(&mut self) {
        self.counters.push(0);
    }

    /**
    Leaves the current level.

    Fails with [NestingError::StackUnderflow] when only the root counter remains;
    the path is left unchanged in that case.
    */
    #[inline]
    pub fn close(&mut self) -> Result<(), NestingError> {
        if self.counters.len() <= 1 {
            return Err(NestingError::StackUnderflow { path: self.clone() });
        }
        self.counters.pop();
        Ok(())
    }

    /// Number of levels, including the root. Always at least 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.counters.len()
    }

    /// The counter of the current level.
    #[inline]
    pub fn last(&self) -> u64 {
        self.counters.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn counters(&self) -> &[u64] {
        &self.counters
    }
}

impl Default for NestingPath {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NestingPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, counter) in self.counters.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", counter)?;
        }
        write!(f, "]")
    }
}

/*
Boilerplate notes for NestingPath:

- Clone: isolation boundaries deep-copy the path, so Clone is essential
- PartialEq/Eq/Hash: data equality, two paths with the same counters are the same position
- Default: the root position [0]
- Display: [a, b, c], used in error messages
- Copy: no, heap allocated
- Ord: lexicographic order would be well defined but has no use here
- From<Vec<u64>>: not implemented, since it could construct an empty path
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_tracks_opens_and_closes() {
        let mut path = NestingPath::new();
        let mut opens = 0;
        let mut closes = 0;
        for step in 0..40 {
            match step % 5 {
                0 | 1 => {
                    path.open();
                    opens += 1;
                }
                2 => path.advance(),
                _ => {
                    if path.depth() > 1 {
                        path.close().unwrap();
                        closes += 1;
                    }
                }
            }
            assert_eq!(path.depth(), 1 + opens - closes);
            assert!(!path.counters().is_empty());
        }
    }

    #[test]
    fn close_at_root_underflows() {
        let mut path = NestingPath::new();
        path.advance();
        path.advance();
        let err = path.close().unwrap_err();
        assert!(matches!(err, NestingError::StackUnderflow { .. }));
        assert_eq!(path.counters(), &[2]);
    }

    #[test]
    fn open_starts_fresh_counter() {
        let mut path = NestingPath::new();
        path.advance();
        path.open();
        assert_eq!(path.counters(), &[1, 0]);
        assert_eq!(path.last(), 0);
        path.advance();
        path.advance();
        assert_eq!(path.last(), 2);
        assert_eq!(path.to_string(), "[1, 2]");
    }
}
