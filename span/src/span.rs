//! # Source Ranges
//!
//! A `Span` is the range of source text a syntax node was parsed from,
//! described by the position of its first and its last character.
//!
//! A `Span` is immutable by design. Mutations will always return a new
//! instance of a Span.
//!
//! The range defined by the start and end position of a `Span` is inclusive on
//! both sides, so a `Span` always covers at least one character. A span
//! created from a single position starts and ends at that position.
use crate::Position;
use serde_derive::{Deserialize, Serialize};
use std::{
    cmp::{max, min},
    fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// position of the first char in the span.
    start: Position,
    /// position of the last char in the span.
    end: Position,
}

impl Span {
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    /// Creates a span containing only the given position
    ///
    /// ```
    /// use span::{Position, Span};
    ///
    /// let span = Span::from_single_position(Position::new(4, 2));
    /// assert!(span.is_single_char());
    /// assert_eq!("4:2", span.to_string());
    /// ```
    pub fn from_single_position(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    pub fn is_single_char(&self) -> bool {
        self.start == self.end
    }

    pub fn start_position(&self) -> Position {
        self.start
    }

    pub fn end_position(&self) -> Position {
        self.end
    }

}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_char() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
