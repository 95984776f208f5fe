// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and lexical error carries a `Position` indicating where it
//! starts in the source file. Positions are 1-based in both coordinates,
//! matching how editors display them.

/// A 1-based line/column position in source text.
///
/// Positions order lexicographically: first by line, then by column. The
/// lexer emits tokens in non-decreasing position order.
///
/// # Examples
///
/// ```
/// use noteg_core::source_analysis::Position;
///
/// let start = Position::start();
/// assert_eq!(start.line(), 1);
/// assert_eq!(start.column(), 1);
/// assert!(start < Position::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    /// Creates a new position from 1-based line and column numbers.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the position of the first character in a file.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub const fn column(self) -> u32 {
        self.column
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
