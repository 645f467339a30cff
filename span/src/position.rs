//! A single character position in a source file.
//!
//! Lines and columns are one based, which is what users expect to see in
//! compiler messages. The serialized form is a `[line, column]` pair to keep
//! serialized syntax trees small.
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The line number, starting at `1`.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The column within the line, starting at `1`.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn line_and_column(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((line, column): (usize, usize)) -> Self {
        Position::new(line, column)
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        position.line_and_column()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
