// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing.
//!
//! Expressions are parsed with a fixed ladder of left-associative
//! precedence levels, lowest binding first:
//!
//! 1. pipe (`|>`)
//! 2. logical or (`||`)
//! 3. logical and (`&&`)
//! 4. equality (`==`, `!=`)
//! 5. comparison (reserved, currently empty)
//! 6. additive (`+`, `-`)
//! 7. multiplicative (`*`, `/`, `%`)
//! 8. unary prefix (`!`, `-`)
//! 9. postfix (call, `.member`, `[index]`)
//! 10. primary (literals, identifiers, arrays, objects, grouping)
//!
//! Each level parses its operand at the next-tighter level and loops on its
//! own operators, so chains associate left without any lookahead beyond one
//! token.

use crate::ast::{Expression, LiteralValue};
use crate::source_analysis::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// Parses an expression at the lowest precedence level.
    ///
    /// This is the entry point used by statement parsing, and the point
    /// where nesting depth is enforced: every recursive re-entry (grouping,
    /// call arguments, index expressions, interpolations) passes through
    /// here.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.enter_nesting()?;
        let result = self.parse_pipe();
        self.leave_nesting();
        result
    }

    /// `a |> f |> g` — pipe, the loosest-binding operator.
    fn parse_pipe(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_logical_or()?;

        while self.match_token(TokenKind::PipeArrow) {
            let right = self.parse_logical_or()?;
            expression = Expression::Pipe {
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// `a || b`
    fn parse_logical_or(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_logical_and()?;

        while self.check(TokenKind::PipePipe) {
            let operator = self.advance();
            let right = self.parse_logical_and()?;
            expression = Expression::Binary {
                operator: operator.text().clone(),
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// `a && b`
    fn parse_logical_and(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_equality()?;

        while self.check(TokenKind::AmpAmp) {
            let operator = self.advance();
            let right = self.parse_equality()?;
            expression = Expression::Binary {
                operator: operator.text().clone(),
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// `a == b`, `a != b`
    fn parse_equality(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_comparison()?;

        while matches!(
            self.current_kind(),
            TokenKind::EqualEqual | TokenKind::BangEqual
        ) {
            let operator = self.advance();
            let right = self.parse_comparison()?;
            expression = Expression::Binary {
                operator: operator.text().clone(),
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// Reserved rung for relational operators. The token set has no `<`,
    /// `>`, `<=`, or `>=` yet, so this delegates straight to the additive
    /// level; the slot keeps the ladder shaped for when they land.
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        self.parse_additive()
    }

    /// `a + b`, `a - b`
    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_multiplicative()?;

        while matches!(self.current_kind(), TokenKind::Plus | TokenKind::Minus) {
            let operator = self.advance();
            let right = self.parse_multiplicative()?;
            expression = Expression::Binary {
                operator: operator.text().clone(),
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// `a * b`, `a / b`, `a % b`
    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_unary()?;

        while matches!(
            self.current_kind(),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let operator = self.advance();
            let right = self.parse_unary()?;
            expression = Expression::Binary {
                operator: operator.text().clone(),
                left: Box::new(expression),
                right: Box::new(right),
            };
        }

        Ok(expression)
    }

    /// Prefix `!` and `-`. Right-recursive, so `!!x` and `--x` nest; the
    /// recursion counts against the nesting limit to keep runs of prefix
    /// operators from overflowing the stack.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if matches!(self.current_kind(), TokenKind::Bang | TokenKind::Minus) {
            let operator = self.advance();
            self.enter_nesting()?;
            let operand = self.parse_unary();
            self.leave_nesting();
            return Ok(Expression::Unary {
                operator: operator.text().clone(),
                operand: Box::new(operand?),
            });
        }

        self.parse_postfix()
    }

    /// Call, member access, and index chains: `f(x).y[0](z)`.
    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::LeftParen) {
                let mut arguments = Vec::new();
                if !self.check(TokenKind::RightParen) {
                    loop {
                        arguments.push(self.parse_expression()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RightParen, "Expected ')' after arguments")?;
                expression = Expression::Call {
                    callee: Box::new(expression),
                    arguments,
                };
            } else if self.match_token(TokenKind::Dot) {
                let name = self.expect(TokenKind::Identifier, "Expected property name after '.'")?;
                let property = Expression::Identifier {
                    name: name.text().clone(),
                    token: name,
                };
                expression = Expression::Member {
                    object: Box::new(expression),
                    property: Box::new(property),
                    computed: false,
                };
            } else if self.match_token(TokenKind::LeftBracket) {
                let property = self.parse_expression()?;
                self.expect(TokenKind::RightBracket, "Expected ']' after index expression")?;
                expression = Expression::Member {
                    object: Box::new(expression),
                    property: Box::new(property),
                    computed: true,
                };
            } else {
                break;
            }
        }

        Ok(expression)
    }

    /// Literals, identifiers, array and object literals, and parenthesized
    /// grouping.
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_kind() {
            TokenKind::Number => self.parse_number(),
            TokenKind::String => {
                let token = self.advance();
                Ok(Expression::Literal {
                    value: LiteralValue::String(token.text().clone()),
                    raw: token.text().clone(),
                    token,
                })
            }
            TokenKind::Boolean => {
                let token = self.advance();
                Ok(Expression::Literal {
                    value: LiteralValue::Boolean(token.text() == "true"),
                    raw: token.text().clone(),
                    token,
                })
            }
            TokenKind::Null => {
                let token = self.advance();
                Ok(Expression::Literal {
                    value: LiteralValue::Null,
                    raw: token.text().clone(),
                    token,
                })
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expression::Identifier {
                    name: token.text().clone(),
                    token,
                })
            }
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftParen => {
                self.advance();
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                Ok(expression)
            }
            TokenKind::Eof => Err(self.error_here("Unexpected end of input")),
            _ => {
                let text = self.current_token().text().clone();
                Err(self.error_here(format!("Unexpected token '{text}'")))
            }
        }
    }

    /// Parses a numeric literal, surfacing an unrepresentable value as a
    /// syntax error rather than panicking.
    fn parse_number(&mut self) -> ParseResult<Expression> {
        let token = self.advance();
        let value: f64 = token.text().parse().map_err(|_| {
            super::ParseError::new(
                format!("Invalid number literal '{}'", token.text()),
                token.clone(),
            )
        })?;
        Ok(Expression::Literal {
            value: LiteralValue::Number(value),
            raw: token.text().clone(),
            token,
        })
    }

    /// `[a, b, c]`
    fn parse_array(&mut self) -> ParseResult<Expression> {
        self.advance(); // [

        let mut elements = Vec::new();
        if !self.check(TokenKind::RightBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightBracket, "Expected ']' after array elements")?;

        Ok(Expression::Array { elements })
    }

    /// `{ key: value, "key": value }` — keys are identifiers or strings.
    /// Duplicate keys are kept in order; resolving them is not the
    /// parser's business.
    fn parse_object(&mut self) -> ParseResult<Expression> {
        self.advance(); // {

        let mut entries = Vec::new();
        if !self.check(TokenKind::RightBrace) {
            loop {
                let key = match self.current_kind() {
                    TokenKind::Identifier | TokenKind::String => self.advance().text().clone(),
                    _ => return Err(self.error_here("Expected property key")),
                };
                self.expect(TokenKind::Colon, "Expected ':' after property key")?;
                let value = self.parse_expression()?;
                entries.push((key, value));
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightBrace, "Expected '}' after object literal")?;

        Ok(Expression::Object { entries })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, LiteralValue, Program, Statement};
    use crate::source_analysis::{lex, parse};

    /// Parses a single expression statement, asserting no errors.
    fn parse_expression(source: &str) -> Expression {
        let (tokens, lex_errors) = lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        let (program, errors) = parse(tokens);
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        let Program { mut statements } = program;
        assert_eq!(statements.len(), 1);
        match statements.pop() {
            Some(Statement::Expression(expression)) => expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn binary_parts(expression: &Expression) -> (&str, &Expression, &Expression) {
        match expression {
            Expression::Binary {
                operator,
                left,
                right,
            } => (operator.as_str(), left, right),
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    fn assert_number(expression: &Expression, expected: f64) {
        match expression {
            Expression::Literal {
                value: LiteralValue::Number(n),
                ..
            } => assert_eq!(*n, expected),
            other => panic!("expected number literal, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expression = parse_expression("1 + 2 * 3");
        let (operator, left, right) = binary_parts(&expression);
        assert_eq!(operator, "+");
        assert_number(left, 1.0);
        let (operator, left, right) = binary_parts(right);
        assert_eq!(operator, "*");
        assert_number(left, 2.0);
        assert_number(right, 3.0);
    }

    #[test]
    fn additive_is_left_associative() {
        let expression = parse_expression("1 - 2 - 3");
        let (operator, left, right) = binary_parts(&expression);
        assert_eq!(operator, "-");
        assert_number(right, 3.0);
        let (operator, left, _) = binary_parts(left);
        assert_eq!(operator, "-");
        assert_number(left, 1.0);
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expression = parse_expression("(1 + 2) * 3");
        let (operator, left, right) = binary_parts(&expression);
        assert_eq!(operator, "*");
        assert_number(right, 3.0);
        let (operator, ..) = binary_parts(left);
        assert_eq!(operator, "+");
    }

    #[test]
    fn logical_operators_stack_below_equality() {
        // a == b && c || d  =>  ((a == b) && c) || d
        let expression = parse_expression("a == b && c || d");
        let (operator, left, right) = binary_parts(&expression);
        assert_eq!(operator, "||");
        assert!(right.is_identifier());
        let (operator, left, _) = binary_parts(left);
        assert_eq!(operator, "&&");
        let (operator, ..) = binary_parts(left);
        assert_eq!(operator, "==");
    }

    #[test]
    fn inequality_parses() {
        let expression = parse_expression("a != b");
        let (operator, ..) = binary_parts(&expression);
        assert_eq!(operator, "!=");
    }

    #[test]
    fn modulo_parses_at_multiplicative_level() {
        let expression = parse_expression("a % b + c");
        let (operator, left, _) = binary_parts(&expression);
        assert_eq!(operator, "+");
        let (operator, ..) = binary_parts(left);
        assert_eq!(operator, "%");
    }

    #[test]
    fn pipe_binds_loosest_and_associates_left() {
        let expression = parse_expression("x + 1 |> f |> g");
        match expression {
            Expression::Pipe { left, right } => {
                assert!(right.is_identifier());
                match *left {
                    Expression::Pipe { left, right } => {
                        assert!(right.is_identifier());
                        let (operator, ..) = binary_parts(&left);
                        assert_eq!(operator, "+");
                    }
                    other => panic!("expected nested pipe, got {other:?}"),
                }
            }
            other => panic!("expected pipe expression, got {other:?}"),
        }
    }

    #[test]
    fn unary_operators_nest() {
        let expression = parse_expression("!!ok");
        match expression {
            Expression::Unary { operator, operand } => {
                assert_eq!(operator, "!");
                assert!(matches!(*operand, Expression::Unary { .. }));
            }
            other => panic!("expected unary expression, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_binds_tighter_than_multiplication() {
        let expression = parse_expression("-a * b");
        let (operator, left, _) = binary_parts(&expression);
        assert_eq!(operator, "*");
        assert!(matches!(left, Expression::Unary { .. }));
    }

    #[test]
    fn postfix_chain_associates_left() {
        // a.b(c)[0]  =>  index(call(member(a, b), [c]), 0)
        let expression = parse_expression("a.b(c)[0]");
        match expression {
            Expression::Member {
                object, computed, ..
            } => {
                assert!(computed);
                match *object {
                    Expression::Call { callee, arguments } => {
                        assert_eq!(arguments.len(), 1);
                        assert!(matches!(
                            *callee,
                            Expression::Member {
                                computed: false,
                                ..
                            }
                        ));
                    }
                    other => panic!("expected call, got {other:?}"),
                }
            }
            other => panic!("expected index expression, got {other:?}"),
        }
    }

    #[test]
    fn call_with_no_arguments() {
        let expression = parse_expression("f()");
        match expression {
            Expression::Call { arguments, .. } => assert!(arguments.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn string_literal_uses_resolved_text() {
        let expression = parse_expression("\"a\\nb\"");
        match expression {
            Expression::Literal {
                value: LiteralValue::String(s),
                raw,
                ..
            } => {
                assert_eq!(s, "a\nb");
                assert_eq!(raw, "a\nb");
            }
            other => panic!("expected string literal, got {other:?}"),
        }
    }

    #[test]
    fn boolean_and_null_literals() {
        assert!(matches!(
            parse_expression("true"),
            Expression::Literal {
                value: LiteralValue::Boolean(true),
                ..
            }
        ));
        assert!(matches!(
            parse_expression("false"),
            Expression::Literal {
                value: LiteralValue::Boolean(false),
                ..
            }
        ));
        assert!(matches!(
            parse_expression("null"),
            Expression::Literal {
                value: LiteralValue::Null,
                ..
            }
        ));
    }

    #[test]
    fn array_literal() {
        let expression = parse_expression("[1, 2, 3]");
        match expression {
            Expression::Array { elements } => {
                assert_eq!(elements.len(), 3);
                assert_number(&elements[2], 3.0);
            }
            other => panic!("expected array literal, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_and_object() {
        assert!(matches!(
            parse_expression("[]"),
            Expression::Array { ref elements } if elements.is_empty()
        ));
        assert!(matches!(
            parse_expression("({})"),
            Expression::Object { ref entries } if entries.is_empty()
        ));
    }

    #[test]
    fn object_literal_keeps_duplicate_keys_in_order() {
        let expression = parse_expression("({ a: 1, \"b\": 2, a: 3 })");
        match expression {
            Expression::Object { entries } => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["a", "b", "a"]);
            }
            other => panic!("expected object literal, got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_paren_is_reported() {
        let (tokens, _) = lex("(1 + 2");
        let (_, errors) = parse(tokens);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expected ')' after expression");
    }

    #[test]
    fn long_unary_run_errors_instead_of_overflowing() {
        let source = format!("{}x", "!".repeat(500));
        let (tokens, _) = lex(&source);
        let (_, errors) = parse(tokens);
        assert!(errors.iter().any(|e| e.message.contains("is too deep")));
    }
}
