// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Lexical error types.
//!
//! Errors carry source positions for precise diagnostics and integrate with
//! [`miette`] for structured reporting. The lexer uses error recovery, so a
//! lexical error never stops tokenization.

use miette::Diagnostic;
use thiserror::Error;

use super::Position;

/// A lexical error encountered during tokenization.
///
/// The lexer records these and keeps scanning from the next character;
/// lexing is a total function over any input string.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The 1-based position of the defect.
    pub position: Position,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_char(c: char, position: Position) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), position)
    }

    /// Creates an "unterminated string" error.
    #[must_use]
    pub fn unterminated_string(position: Position) -> Self {
        Self::new(LexErrorKind::UnterminatedString, position)
    }

    /// Returns the 1-based line of the defect.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.position.line()
    }

    /// Returns the 1-based column of the defect.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.position.column()
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that no token can start with.
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A string literal whose closing quote never arrived.
    #[error("Unterminated string")]
    UnterminatedString,
}
