// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Source analysis: lexing and parsing of NoteG source code.
//!
//! This module turns raw source text into the AST defined in [`crate::ast`].
//! Both stages are error-tolerant: the lexer records lexical errors and
//! keeps scanning, and the parser records syntax errors and resynchronizes
//! at statement boundaries, so a best-effort tree is always available for
//! tooling even when the source is mid-edit.
//!
//! [`parse_source`] runs both stages; [`lex`] and [`parse`] expose them
//! individually.

mod error;
mod lexer;
mod position;
mod token;

mod parser;


pub use error::{LexError, LexErrorKind};
pub use lexer::{lex, Lexer};
pub use parser::{parse, ParseError};
pub use position::Position;
pub use token::{classify_word, Token, TokenKind, KEYWORDS};

use crate::ast::Program;

/// Lexes and parses source text in one step.
///
/// Returns the program together with both error lists. The two stages are
/// independent: lexical errors do not stop parsing, since the lexer still
/// produces tokens for everything it could scan.
///
/// # Examples
///
/// ```
/// use noteg_core::source_analysis::parse_source;
///
/// let (program, lex_errors, parse_errors) = parse_source("let x = 42;");
/// assert!(lex_errors.is_empty());
/// assert!(parse_errors.is_empty());
/// assert_eq!(program.statements.len(), 1);
/// ```
#[must_use]
pub fn parse_source(source: &str) -> (Program, Vec<LexError>, Vec<ParseError>) {
    let (tokens, lex_errors) = lex(source);
    let (program, parse_errors) = parse(tokens);
    (program, lex_errors, parse_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    #[test]
    fn parse_source_runs_both_stages() {
        let (program, lex_errors, parse_errors) = parse_source("let x = 1;\nlet y = x + 2;");
        assert!(lex_errors.is_empty());
        assert!(parse_errors.is_empty());
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn lexical_errors_do_not_stop_parsing() {
        let (program, lex_errors, parse_errors) = parse_source("let x = 1; § let y = 2;");
        assert_eq!(lex_errors.len(), 1);
        // The bad character produced no token, so both statements parse.
        assert!(parse_errors.is_empty());
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            program.statements[1],
            Statement::VariableDeclaration { .. }
        ));
    }

    #[test]
    fn both_error_lists_can_be_populated() {
        let (_, lex_errors, parse_errors) = parse_source("let § ;");
        assert_eq!(lex_errors.len(), 1);
        assert_eq!(parse_errors.len(), 1);
    }
}
