// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for NoteG.
//!
//! The AST represents the structure of a NoteG program after parsing. It is
//! designed for editor tooling: the parser always produces a [`Program`],
//! possibly with a partial statement list, and annotates defects in its
//! error list rather than failing.
//!
//! Leaf nodes (identifiers and literals) retain their [`Token`], giving
//! consumers positional information without a separate source map; literals
//! additionally retain both the parsed value and the raw text.
//!
//! # Example
//!
//! ```ignore
//! // Source: let x = 42;
//! Program {
//!     statements: vec![Statement::VariableDeclaration {
//!         mutable: true,
//!         name: "x".into(),
//!         initializer: Some(Expression::Literal {
//!             value: LiteralValue::Number(42.0),
//!             raw: "42".into(),
//!             token: ...,
//!         }),
//!     }],
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::Token;

/// Top-level container for a parsed NoteG document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements in this program, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a new program with the given statements.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns `true` if the program contains no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A NoteG statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration: `let x = 1;` or `const y;`
    VariableDeclaration {
        /// `true` for `let`, `false` for `const`.
        mutable: bool,
        /// The bound name.
        name: EcoString,
        /// The optional initializer expression.
        initializer: Option<Expression>,
    },

    /// A function declaration: `fn add(a, b) { ... }`
    FunctionDeclaration {
        /// The function name.
        name: EcoString,
        /// Ordered parameter names.
        parameters: Vec<EcoString>,
        /// The body statement sequence.
        body: Vec<Statement>,
    },

    /// An expression in statement position.
    Expression(Expression),

    /// A return statement: `return expr;` or bare `return;`
    Return {
        /// The optional returned expression.
        argument: Option<Expression>,
    },

    /// A conditional: `if (test) { ... } else { ... }`
    If {
        /// The parenthesised test expression.
        test: Expression,
        /// The consequent block.
        consequent: Vec<Statement>,
        /// The optional `else` block.
        alternate: Option<Vec<Statement>>,
    },

    /// A for-in loop: `for item in items { ... }`
    ForIn {
        /// The loop variable name.
        variable: EcoString,
        /// The iterated expression.
        iterable: Expression,
        /// The body block.
        body: Vec<Statement>,
    },

    /// An import: `import { a, b } from "module";`
    Import {
        /// The imported names, in source order.
        names: Vec<EcoString>,
        /// The module path string.
        source: EcoString,
    },

    /// An export wrapping exactly one statement: `export fn f() { ... }`
    Export(Box<Statement>),

    /// A template block: `template {{ expr }} ...`
    ///
    /// Fragments mix literal text and interpolated expressions, in source
    /// order.
    Template {
        /// The ordered template fragments.
        fragments: Vec<TemplateFragment>,
    },
}

/// One piece of a template block.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateFragment {
    /// Literal text between interpolations.
    Text(EcoString),
    /// A `{{ expr }}` interpolation; the expression is a
    /// [`Expression::TemplateExpression`].
    Interpolation(Expression),
}

/// A NoteG expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A name reference.
    Identifier {
        /// The referenced name.
        name: EcoString,
        /// The identifier token, for positions.
        token: Token,
    },

    /// A literal value.
    Literal {
        /// The parsed value.
        value: LiteralValue,
        /// The raw token text.
        raw: EcoString,
        /// The literal token, for positions.
        token: Token,
    },

    /// A binary operation: `left op right`.
    Binary {
        /// The operator symbol as written (`+`, `==`, ...).
        operator: EcoString,
        /// The left operand.
        left: Box<Expression>,
        /// The right operand.
        right: Box<Expression>,
    },

    /// A unary prefix operation: `!operand` or `-operand`.
    Unary {
        /// The operator symbol as written (`!` or `-`).
        operator: EcoString,
        /// The operand.
        operand: Box<Expression>,
    },

    /// A call: `callee(arg, ...)`.
    Call {
        /// The called expression.
        callee: Box<Expression>,
        /// Ordered argument expressions.
        arguments: Vec<Expression>,
    },

    /// Member access: `object.name` or `object[expr]`.
    Member {
        /// The accessed object.
        object: Box<Expression>,
        /// The property: an identifier for dot access, any expression for
        /// bracket access.
        property: Box<Expression>,
        /// `true` for bracket access, `false` for dot access.
        computed: bool,
    },

    /// An array literal: `[a, b, c]`.
    Array {
        /// Ordered element expressions.
        elements: Vec<Expression>,
    },

    /// An object literal: `{ key: value, ... }`.
    ///
    /// Entries keep construction order; duplicate keys are permitted and
    /// simply overwrite at consumption time.
    Object {
        /// Ordered key/value pairs.
        entries: Vec<(EcoString, Expression)>,
    },

    /// A pipeline: `value |> function`. The left side is the argument, the
    /// right side the applied function.
    Pipe {
        /// The piped value.
        left: Box<Expression>,
        /// The applied function.
        right: Box<Expression>,
    },

    /// A template interpolation wrapper around one expression.
    TemplateExpression(Box<Expression>),
}

impl Expression {
    /// Returns `true` if this expression is a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// Returns `true` if this expression is an identifier.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }
}

/// The parsed value of a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A string value, escapes resolved.
    String(EcoString),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
    /// The null value.
    Null,
}
