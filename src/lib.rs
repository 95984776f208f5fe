// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! NoteG language front end.
//!
//! This crate contains the core front-end functionality:
//! - Lexical analysis (tokenization with positional tokens)
//! - Parsing (syntax-tree construction with error recovery)
//!
//! The front end is designed for editor tooling first: both stages are
//! total functions over arbitrary input, annotating their output with the
//! errors found rather than failing.

pub mod ast;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Expression, LiteralValue, Program, Statement};
    pub use crate::source_analysis::{Position, Token, TokenKind};
}
