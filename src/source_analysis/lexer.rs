// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for NoteG source code.
//!
//! This module converts source text into an ordered token sequence plus a
//! list of lexical errors, in one forward pass. The lexer is hand-written
//! for maximum control over error recovery and positional accuracy.
//!
//! # Design Principles
//!
//! - **Total over any input**: malformed characters are recorded as
//!   [`LexError`]s and scanning continues from the next character.
//! - **Positional tokens**: every token carries its 1-based line/column
//!   start and its length in characters.
//! - **Modal braces**: `{{` begins a template-interpolation span and `}}`
//!   ends one; elsewhere braces are ordinary block delimiters. A stray `}}`
//!   outside a template span is two plain braces, not an error.
//!
//! # Example
//!
//! ```
//! use noteg_core::source_analysis::{lex, TokenKind};
//!
//! let (tokens, errors) = lex("x + 1");
//! assert!(errors.is_empty());
//! assert_eq!(tokens.len(), 4); // x, +, 1, <eof>
//! assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::Eof));
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{LexError, Position, Token, TokenKind, classify_word};

/// A lexer that tokenizes NoteG source code.
///
/// Construct one per source snapshot and call [`Lexer::tokenize`] exactly
/// once; no state survives the call. The convenience function [`lex`] does
/// both steps.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column.
    column: u32,
    /// Whether the scanner is inside a `{{ ... }}` template span.
    in_template: bool,
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Lexical errors recorded so far.
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("line", &self.line)
            .field("column", &self.column)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            in_template: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Runs the scan to completion.
    ///
    /// The returned token sequence always ends with a [`TokenKind::Eof`]
    /// token, and tokens appear in non-decreasing `(line, column)` order.
    #[must_use]
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        while self.peek_char().is_some() {
            self.lex_token();
        }
        let eof_position = self.here();
        self.tokens.push(Token::new(TokenKind::Eof, "", eof_position));
        (self.tokens, self.errors)
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`, n=1 returns the second character, etc.).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character, updating line/column tracking.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current source position.
    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Extracts source text from a byte offset to the current position.
    fn text_from(&self, start: usize) -> &'src str {
        &self.source[start..self.position]
    }

    /// Appends a token starting at `position`.
    fn push(&mut self, kind: TokenKind, text: impl Into<EcoString>, position: Position) {
        self.tokens.push(Token::new(kind, text, position));
    }

    /// Scans one lead character and emits at most one token.
    fn lex_token(&mut self) {
        let start = self.here();
        let Some(c) = self.peek_char() else { return };

        match c {
            // Whitespace other than newline is discarded
            ' ' | '\t' | '\r' => {
                self.advance();
            }

            // Newlines are tokens; callers that care about statement
            // boundaries consume them, the parser filters them
            '\n' => {
                self.advance();
                self.push(TokenKind::Newline, "\n", start);
            }

            // Identifiers, reserved words, and word literals
            'a'..='z' | 'A'..='Z' | '_' => self.lex_word(start),

            // Numbers
            '0'..='9' => self.lex_number(start),

            // Strings (either quote character)
            '"' | '\'' => self.lex_string(c, start),

            // Division or comments
            '/' if self.peek_char_n(1) == Some('/') => self.lex_line_comment(start),
            '/' if self.peek_char_n(1) == Some('*') => self.lex_block_comment(start),
            '/' => {
                self.advance();
                self.push(TokenKind::Slash, "/", start);
            }

            // Two-character operators, one character of lookahead each
            '-' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    self.push(TokenKind::Arrow, "->", start);
                } else {
                    self.push(TokenKind::Minus, "-", start);
                }
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    self.push(TokenKind::EqualEqual, "==", start);
                } else {
                    self.push(TokenKind::Assign, "=", start);
                }
            }
            '!' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    self.push(TokenKind::BangEqual, "!=", start);
                } else {
                    self.push(TokenKind::Bang, "!", start);
                }
            }
            '&' => {
                self.advance();
                if self.peek_char() == Some('&') {
                    self.advance();
                    self.push(TokenKind::AmpAmp, "&&", start);
                }
                // A bare `&` is not a token; it is dropped with no error,
                // a known asymmetry with `|`.
            }

            // Three-way disambiguation on one character of lookahead
            '|' => {
                self.advance();
                match self.peek_char() {
                    Some('>') => {
                        self.advance();
                        self.push(TokenKind::PipeArrow, "|>", start);
                    }
                    Some('|') => {
                        self.advance();
                        self.push(TokenKind::PipePipe, "||", start);
                    }
                    _ => self.push(TokenKind::Pipe, "|", start),
                }
            }

            // Mode-sensitive braces
            '{' => {
                self.advance();
                if self.peek_char() == Some('{') {
                    self.advance();
                    self.in_template = true;
                    self.push(TokenKind::TemplateStart, "{{", start);
                } else {
                    self.push(TokenKind::LeftBrace, "{", start);
                }
            }
            '}' => {
                self.advance();
                if self.in_template && self.peek_char() == Some('}') {
                    self.advance();
                    self.in_template = false;
                    self.push(TokenKind::TemplateEnd, "}}", start);
                } else {
                    self.push(TokenKind::RightBrace, "}", start);
                }
            }

            // Single-character punctuation
            '+' => {
                self.advance();
                self.push(TokenKind::Plus, "+", start);
            }
            '*' => {
                self.advance();
                self.push(TokenKind::Star, "*", start);
            }
            '%' => {
                self.advance();
                self.push(TokenKind::Percent, "%", start);
            }
            '(' => {
                self.advance();
                self.push(TokenKind::LeftParen, "(", start);
            }
            ')' => {
                self.advance();
                self.push(TokenKind::RightParen, ")", start);
            }
            '[' => {
                self.advance();
                self.push(TokenKind::LeftBracket, "[", start);
            }
            ']' => {
                self.advance();
                self.push(TokenKind::RightBracket, "]", start);
            }
            ',' => {
                self.advance();
                self.push(TokenKind::Comma, ",", start);
            }
            '.' => {
                self.advance();
                self.push(TokenKind::Dot, ".", start);
            }
            ':' => {
                self.advance();
                self.push(TokenKind::Colon, ":", start);
            }
            ';' => {
                self.advance();
                self.push(TokenKind::Semicolon, ";", start);
            }

            // Unknown character — record the defect and keep scanning
            _ => {
                self.advance();
                self.errors.push(LexError::unexpected_char(c, start));
            }
        }
    }

    /// Lexes an identifier, reserved word, or word literal (`true`/`false`/`null`).
    fn lex_word(&mut self, start: Position) {
        let byte_start = self.position;
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.text_from(byte_start);
        self.push(classify_word(text), text, start);
    }

    /// Lexes a number literal: digits, optionally a decimal point and more
    /// digits — only when a digit follows the point, so a trailing member
    /// access dot is left alone (`1.abs` is `1` `.` `abs`).
    fn lex_number(&mut self, start: Position) {
        let byte_start = self.position;
        self.advance_while(|c| c.is_ascii_digit());

        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // consume '.'
            self.advance_while(|c| c.is_ascii_digit());
        }

        let text = self.text_from(byte_start);
        self.push(TokenKind::Number, text, start);
    }

    /// Lexes a string literal delimited by `quote` (`"` or `'`).
    ///
    /// Escape sequences are resolved into the token text; unrecognized
    /// escapes pass the escaped character through. Running out of input
    /// before the closing quote records an unterminated-string error at the
    /// opening quote and emits no token.
    fn lex_string(&mut self, quote: char, start: Position) {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek_char() {
                None => {
                    self.errors.push(LexError::unterminated_string(start));
                    return;
                }
                Some(c) if c == quote => {
                    self.advance(); // closing quote
                    break;
                }
                Some('\\') => {
                    self.advance(); // backslash
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('\\') => value.push('\\'),
                        Some('"') => value.push('"'),
                        Some('\'') => value.push('\''),
                        Some(other) => value.push(other),
                        None => {
                            self.errors.push(LexError::unterminated_string(start));
                            return;
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        self.push(TokenKind::String, value, start);
    }

    /// Lexes a line comment: `//` through the end of the line, newline
    /// excluded. The token text includes the `//` prefix.
    fn lex_line_comment(&mut self, start: Position) {
        let byte_start = self.position;
        self.advance(); // /
        self.advance(); // /
        self.advance_while(|c| c != '\n');
        let text = self.text_from(byte_start);
        self.push(TokenKind::Comment, text, start);
    }

    /// Lexes a block comment: `/* ... */`, spanning newlines.
    ///
    /// Unterminated block comments are tolerated: on end of input the token
    /// holds whatever was consumed and no error is recorded.
    fn lex_block_comment(&mut self, start: Position) {
        let byte_start = self.position;
        self.advance(); // /
        self.advance(); // *

        loop {
            match self.peek_char() {
                None => break,
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        let text = self.text_from(byte_start);
        self.push(TokenKind::Comment, text, start);
    }
}

/// Convenience function to lex source into tokens and errors.
///
/// The token sequence always ends with an [`TokenKind::Eof`] token.
#[must_use]
pub fn lex(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(source).tokenize()
}
