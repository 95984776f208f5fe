// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for NoteG source code.
//!
//! The parser builds a [`Program`] from a stream of tokens. It is designed
//! for editor tooling with comprehensive error recovery:
//!
//! - **A tree is always produced** — even wildly malformed input yields a
//!   `Program` with every statement that could be salvaged.
//! - **Multiple errors** — parsing records all errors rather than stopping
//!   at the first.
//! - **Statement-level resynchronization** — a failure inside one statement
//!   never poisons its siblings: the error is recorded, tokens are skipped
//!   to the next statement boundary, and parsing resumes.
//!
//! Every parse step returns a `Result`; only the top-level statement loop
//! catches failures. Expression precedence is a fixed ladder of
//! left-associative levels (see the `expressions` module), not a binding
//! power table — the operator set is closed and small.
//!
//! # Usage
//!
//! ```
//! use noteg_core::source_analysis::{lex, parse};
//!
//! let (tokens, _) = lex("let x = 42;");
//! let (program, errors) = parse(tokens);
//!
//! assert!(errors.is_empty());
//! assert_eq!(program.statements.len(), 1);
//! ```

use ecow::EcoString;

use crate::ast::{Expression, Program, Statement, TemplateFragment};
use crate::source_analysis::{Position, Token, TokenKind};

// Expression-parsing impl block for Parser
mod expressions;

// Property-based tests for the parser
#[cfg(test)]
mod property_tests;

/// Maximum nesting depth before the parser bails out.
///
/// Statements and expressions share one depth budget: deeply nested input
/// (e.g. `((((...))))`, `!!!!...x`, `export export ...`, or block-in-block
/// chains) hits the limit instead of overflowing the stack. Exceeding it is
/// an ordinary [`ParseError`], caught and recovered from like any other.
/// 64 is generous for any realistic program while keeping recursion well
/// inside default stack limits.
const MAX_NESTING_DEPTH: usize = 64;

/// A syntax error tied to the token where it was detected.
///
/// The token is cloned out of the stream; consumers read its position and
/// length to place a diagnostic range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: EcoString,
    /// The offending token.
    pub token: Token,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, token: Token) -> Self {
        Self {
            message: message.into(),
            token,
        }
    }

    /// Returns the 1-based position of the offending token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.token.position()
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.position())
    }
}

impl std::error::Error for ParseError {}

/// The result of one parse step.
pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Parses a token sequence into a program.
///
/// This is the main entry point for parsing. It always returns a
/// [`Program`], even if there are syntax errors; check the returned error
/// list. Comment and line-break tokens are filtered out up front, so the
/// grammar never sees them.
///
/// # Examples
///
/// ```
/// use noteg_core::source_analysis::{lex, parse};
///
/// let (tokens, _) = lex("let greeting = \"hi\"");
/// let (program, errors) = parse(tokens);
/// assert!(errors.is_empty());
/// assert_eq!(program.statements.len(), 1);
/// ```
#[must_use]
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.errors)
}

/// The parser state.
pub(super) struct Parser {
    /// The tokens being parsed (comments and newlines pre-filtered).
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Accumulated syntax errors.
    errors: Vec<ParseError>,
    /// Current expression nesting depth (guards against stack overflow).
    nesting_depth: usize,
}

impl Parser {
    /// Creates a new parser, filtering out comment and newline tokens.
    fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.kind().is_trivia())
            .collect();
        // Tolerate callers that hand over a stream without the trailing
        // EOF marker; the grammar relies on it being present.
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let position = tokens.last().map_or(Position::start(), Token::position);
            tokens.push(Token::new(TokenKind::Eof, "", position));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            nesting_depth: 0,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> TokenKind {
        self.current_token().kind()
    }

    /// Returns the most recently consumed token.
    fn previous_token(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the consumed one.
    pub(super) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous_token().clone()
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind, advancing if it
    /// does; otherwise returns an error referencing the current token.
    pub(super) fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Checks if the current token is the reserved word `word`.
    fn at_keyword(&self, word: &str) -> bool {
        self.current_token().is_keyword(word)
    }

    /// Consumes the current token if it is the reserved word `word`.
    fn match_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the reserved word `word` at the current token.
    fn expect_keyword(&mut self, word: &str, message: &str) -> ParseResult<Token> {
        if self.at_keyword(word) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Builds a syntax error referencing the current token.
    pub(super) fn error_here(&self, message: impl Into<EcoString>) -> ParseError {
        ParseError::new(message, self.current_token().clone())
    }

    /// Increments the nesting depth, erroring past [`MAX_NESTING_DEPTH`].
    /// Pair with [`Parser::leave_nesting`] on every Ok path.
    pub(super) fn enter_nesting(&mut self) -> ParseResult<()> {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            self.nesting_depth -= 1;
            return Err(self.error_here(format!(
                "Nesting is too deep (maximum {MAX_NESTING_DEPTH} levels)"
            )));
        }
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Parser::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Synchronizes the parser to the next statement boundary.
    ///
    /// Advances until a semicolon has just been consumed or the current
    /// token begins a new statement, then returns so normal statement
    /// parsing can resume.
    ///
    /// The offending token is always consumed first, even when it is itself
    /// a statement-start keyword (the `let` in `1 + let x = 2;`), so the
    /// statement that keyword would have begun is skipped. That guarantees
    /// progress: every recovery consumes at least one token.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous_token().kind() == TokenKind::Semicolon {
                return;
            }
            if self.at_statement_start() {
                return;
            }
            self.advance();
        }
    }

    /// Returns `true` if the current token can begin a new statement.
    ///
    /// `else`, `in`, `from`, and `template` are reserved words that do not
    /// start a statement the recovery loop should stop at.
    fn at_statement_start(&self) -> bool {
        self.current_kind() == TokenKind::Keyword
            && matches!(
                self.current_token().text().as_str(),
                "let" | "const" | "fn" | "if" | "for" | "return" | "import" | "export"
            )
    }

    // ========================================================================
    // Statement Parsing
    // ========================================================================

    /// Parses statements until end of input.
    ///
    /// This is the only catch point for parse failures: an `Err` from any
    /// statement records the error and resynchronizes, so one malformed
    /// statement never aborts the program.
    fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        Program::new(statements)
    }

    /// Parses one statement.
    ///
    /// Statement recursion (nested blocks, `export` chains) flows through
    /// here, so it shares the expression nesting budget: runaway depth
    /// surfaces as a [`ParseError`], never a stack overflow.
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.enter_nesting()?;
        let result = self.parse_statement_kind();
        self.leave_nesting();
        result
    }

    /// Dispatches on the leading keyword, falling through to an
    /// expression-statement when none matches.
    fn parse_statement_kind(&mut self) -> ParseResult<Statement> {
        if self.current_kind() == TokenKind::Keyword {
            match self.current_token().text().as_str() {
                "let" | "const" => return self.parse_variable_declaration(),
                "fn" => return self.parse_function_declaration(),
                "return" => return self.parse_return(),
                "if" => return self.parse_if(),
                "for" => return self.parse_for_in(),
                "import" => return self.parse_import(),
                "export" => return self.parse_export(),
                "template" => return self.parse_template(),
                // `else`, `in`, `from` in statement position fall through
                // and surface as an unexpected-token error
                _ => {}
            }
        }

        let expression = self.parse_expression()?;
        self.match_token(TokenKind::Semicolon);
        Ok(Statement::Expression(expression))
    }

    /// Parses `let name = expr;` or `const name = expr;` (initializer and
    /// semicolon both optional).
    fn parse_variable_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let mutable = keyword.text() == "let";

        let name = self
            .expect(TokenKind::Identifier, "Expected variable name")?
            .text()
            .clone();

        let initializer = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.match_token(TokenKind::Semicolon);
        Ok(Statement::VariableDeclaration {
            mutable,
            name,
            initializer,
        })
    }

    /// Parses `fn name(params) { body }`.
    fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        self.advance(); // fn

        let name = self
            .expect(TokenKind::Identifier, "Expected function name")?
            .text()
            .clone();
        self.expect(TokenKind::LeftParen, "Expected '(' after function name")?;

        let mut parameters = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let parameter = self.expect(TokenKind::Identifier, "Expected parameter name")?;
                parameters.push(parameter.text().clone());
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expected ')' after parameters")?;

        let body = self.parse_block()?;
        Ok(Statement::FunctionDeclaration {
            name,
            parameters,
            body,
        })
    }

    /// Parses a brace-delimited statement sequence.
    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.expect(TokenKind::LeftBrace, "Expected '{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RightBrace, "Expected '}'")?;
        Ok(statements)
    }

    /// Parses `return expr;`, with the argument omitted when the next token
    /// already terminates the statement or block.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        self.advance(); // return

        let argument = if self.check(TokenKind::Semicolon)
            || self.check(TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.match_token(TokenKind::Semicolon);
        Ok(Statement::Return { argument })
    }

    /// Parses `if (test) { ... }` with an optional `else { ... }`.
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.advance(); // if

        self.expect(TokenKind::LeftParen, "Expected '(' after 'if'")?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected ')' after condition")?;

        let consequent = self.parse_block()?;
        let alternate = if self.match_keyword("else") {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            test,
            consequent,
            alternate,
        })
    }

    /// Parses `for variable in iterable { ... }`.
    fn parse_for_in(&mut self) -> ParseResult<Statement> {
        self.advance(); // for

        let variable = self
            .expect(TokenKind::Identifier, "Expected loop variable")?
            .text()
            .clone();
        self.expect_keyword("in", "Expected 'in' after loop variable")?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(Statement::ForIn {
            variable,
            iterable,
            body,
        })
    }

    /// Parses `import { a, b } from "module";`.
    fn parse_import(&mut self) -> ParseResult<Statement> {
        self.advance(); // import

        self.expect(TokenKind::LeftBrace, "Expected '{' after 'import'")?;
        let mut names = Vec::new();
        if !self.check(TokenKind::RightBrace) {
            loop {
                let name = self.expect(TokenKind::Identifier, "Expected imported name")?;
                names.push(name.text().clone());
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightBrace, "Expected '}' after imported names")?;

        self.expect_keyword("from", "Expected 'from' after import list")?;
        let source = self
            .expect(TokenKind::String, "Expected module path string")?
            .text()
            .clone();

        self.match_token(TokenKind::Semicolon);
        Ok(Statement::Import { names, source })
    }

    /// Parses `export <statement>`.
    fn parse_export(&mut self) -> ParseResult<Statement> {
        self.advance(); // export
        let statement = self.parse_statement()?;
        Ok(Statement::Export(Box::new(statement)))
    }

    /// Parses a template block: a run of literal-text fragments and
    /// `{{ expr }}` interpolations, terminated by the first token that is
    /// neither.
    fn parse_template(&mut self) -> ParseResult<Statement> {
        self.advance(); // template

        let mut fragments = Vec::new();
        loop {
            if self.check(TokenKind::TemplateText) {
                let text = self.advance();
                fragments.push(TemplateFragment::Text(text.text().clone()));
            } else if self.match_token(TokenKind::TemplateStart) {
                let expression = self.parse_expression()?;
                self.expect(
                    TokenKind::TemplateEnd,
                    "Expected '}}' after template expression",
                )?;
                fragments.push(TemplateFragment::Interpolation(
                    Expression::TemplateExpression(Box::new(expression)),
                ));
            } else {
                break;
            }
        }

        Ok(Statement::Template { fragments })
    }
}
