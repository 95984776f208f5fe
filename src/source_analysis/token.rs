// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Token types for NoteG lexical analysis.
//!
//! This module defines the tokens produced by the lexer. Each token carries
//! its classification ([`TokenKind`]), the exact text consumed (with string
//! escapes already resolved), its 1-based start [`Position`], and its length
//! in characters — everything a diagnostics consumer needs to compute an
//! end position.
//!
//! Comments and line breaks are first-class tokens rather than trivia; the
//! parser filters them out before applying the grammar.

use ecow::EcoString;

use super::Position;

/// The reserved words of NoteG.
///
/// `true`, `false`, and `null` are classified as literals before this table
/// is consulted.
pub const KEYWORDS: &[&str] = &[
    "let", "const", "fn", "return", "if", "else", "for", "in", "import", "from", "export",
    "template",
];

/// The kind of token, not including text or source location.
///
/// This is the closed set of syntactic elements that can appear in NoteG
/// source. Two members are declared but never produced by the current
/// scanner: [`TokenKind::TemplateText`] (the parser's template loop accepts
/// it, the scanner has no rule that emits it) and [`TokenKind::Error`]
/// (lexical defects are reported through the `LexError` list instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// A string literal: `"hello"` or `'hello'` (escapes resolved).
    String,
    /// A number literal: `42`, `3.14`.
    Number,
    /// A boolean literal: `true` or `false`.
    Boolean,
    /// The null literal: `null`.
    Null,

    // === Names ===
    /// An identifier: `foo`, `user_name`.
    Identifier,
    /// A reserved word, one of [`KEYWORDS`].
    Keyword,

    // === Operators and punctuation ===
    /// Assignment: `=`
    Assign,
    /// Equality: `==`
    EqualEqual,
    /// Inequality: `!=`
    BangEqual,
    /// Addition: `+`
    Plus,
    /// Subtraction or unary negation: `-`
    Minus,
    /// Multiplication: `*`
    Star,
    /// Division: `/`
    Slash,
    /// Remainder: `%`
    Percent,
    /// Logical not: `!`
    Bang,
    /// Logical and: `&&`
    AmpAmp,
    /// Logical or: `||`
    PipePipe,
    /// Pipe punctuation: `|`
    Pipe,
    /// Pipeline application: `|>`
    PipeArrow,
    /// Arrow: `->`
    Arrow,
    /// Left parenthesis: `(`
    LeftParen,
    /// Right parenthesis: `)`
    RightParen,
    /// Left brace: `{`
    LeftBrace,
    /// Right brace: `}`
    RightBrace,
    /// Left bracket: `[`
    LeftBracket,
    /// Right bracket: `]`
    RightBracket,
    /// Comma: `,`
    Comma,
    /// Member access dot: `.`
    Dot,
    /// Colon: `:`
    Colon,
    /// Statement terminator: `;`
    Semicolon,

    // === Template spans ===
    /// Start of a template interpolation: `{{`
    TemplateStart,
    /// End of a template interpolation: `}}`
    TemplateEnd,
    /// Literal text inside a template block (declared, never scanned).
    TemplateText,

    // === Filtered before parsing ===
    /// A line or block comment, delimiters included.
    Comment,
    /// A line break: `\n`
    Newline,

    // === Special ===
    /// End of input. Always the final token of a lex.
    Eof,
    /// Lexical-error marker (declared, never scanned).
    Error,
}

impl TokenKind {
    /// Returns `true` if this token is a literal value.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean | Self::Null)
    }

    /// Returns `true` if this token is filtered out before parsing.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Newline)
    }

    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::Assign => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Pipe => "|",
            Self::PipeArrow => "|>",
            Self::Arrow => "->",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::TemplateStart => "{{",
            Self::TemplateEnd => "}}",
            Self::TemplateText => "template text",
            Self::Comment => "comment",
            Self::Newline => "newline",
            Self::Eof => "<eof>",
            Self::Error => "<error>",
        };
        f.write_str(name)
    }
}

/// Classifies a scanned word as a literal, reserved word, or identifier.
///
/// Priority order: boolean literal, null literal, reserved word, identifier.
#[must_use]
pub fn classify_word(text: &str) -> TokenKind {
    match text {
        "true" | "false" => TokenKind::Boolean,
        "null" => TokenKind::Null,
        _ if KEYWORDS.contains(&text) => TokenKind::Keyword,
        _ => TokenKind::Identifier,
    }
}

/// A token with its text and source location.
///
/// `text` is the exact substring consumed from the source, except that
/// string literals carry their text with escape sequences resolved.
/// `length` is the character count of `text`, used by diagnostics to
/// compute the token's end position.
///
/// # Examples
///
/// ```
/// use noteg_core::source_analysis::{Position, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier, "foo", Position::new(1, 5));
/// assert_eq!(token.text(), "foo");
/// assert_eq!(token.length(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: EcoString,
    position: Position,
    length: u32,
}

impl Token {
    /// Creates a new token. The length is derived from `text`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "tokens over 4 billion characters are not supported"
    )]
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<EcoString>, position: Position) -> Self {
        let text = text.into();
        let length = text.chars().count() as u32;
        Self {
            kind,
            text,
            position,
            length,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token's text (escapes resolved for string literals).
    #[must_use]
    pub fn text(&self) -> &EcoString {
        &self.text
    }

    /// Returns the 1-based position of the token's first character.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the character count of the token's text.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns `true` if this token is the reserved word `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "'{}'", self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_word_priority() {
        assert_eq!(classify_word("true"), TokenKind::Boolean);
        assert_eq!(classify_word("false"), TokenKind::Boolean);
        assert_eq!(classify_word("null"), TokenKind::Null);
        assert_eq!(classify_word("let"), TokenKind::Keyword);
        assert_eq!(classify_word("template"), TokenKind::Keyword);
        assert_eq!(classify_word("letter"), TokenKind::Identifier);
        assert_eq!(classify_word("x"), TokenKind::Identifier);
    }

    #[test]
    fn token_length_counts_characters() {
        let token = Token::new(TokenKind::Identifier, "naïve", Position::start());
        assert_eq!(token.length(), 5);
    }

    #[test]
    fn token_accessors() {
        let token = Token::new(TokenKind::Number, "42", Position::new(2, 7));
        assert_eq!(token.kind(), TokenKind::Number);
        assert_eq!(token.text(), "42");
        assert_eq!(token.position(), Position::new(2, 7));
        assert_eq!(token.length(), 2);
    }

    #[test]
    fn token_keyword_predicate() {
        let token = Token::new(TokenKind::Keyword, "let", Position::start());
        assert!(token.is_keyword("let"));
        assert!(!token.is_keyword("const"));
        let ident = Token::new(TokenKind::Identifier, "let_binding", Position::start());
        assert!(!ident.is_keyword("let"));
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::String.is_literal());
        assert!(TokenKind::Null.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::Comment.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(!TokenKind::Semicolon.is_trivia());
        assert!(TokenKind::Eof.is_eof());
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::PipeArrow.to_string(), "|>");
        assert_eq!(TokenKind::TemplateStart.to_string(), "{{");
        assert_eq!(TokenKind::TemplateEnd.to_string(), "}}");
        assert_eq!(TokenKind::Eof.to_string(), "<eof>");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
    }

    #[test]
    fn token_display() {
        let token = Token::new(TokenKind::Number, "42", Position::start());
        assert_eq!(token.to_string(), "'42'");
        let eof = Token::new(TokenKind::Eof, "", Position::start());
        assert_eq!(eof.to_string(), "<eof>");
    }
}
