// Copyright 2026 NoteG contributors
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the NoteG parser.
//!
//! These tests use `proptest` to verify parser invariants over generated
//! inputs:
//!
//! 1. **Parser never panics** — arbitrary input always produces a program
//! 2. **Valid programs parse cleanly** — known-good sources report no errors
//! 3. **Errors carry content** — every reported error has a message and token
//! 4. **Parsing is deterministic** — same input, same tree and errors

use proptest::prelude::*;

use crate::source_analysis::{lex, parse, parse_source};

// ============================================================================
// Generators
// ============================================================================

/// Known-valid statements that should parse without errors.
const VALID_STATEMENTS: &[&str] = &[
    "let x = 42;",
    "const name = \"world\";",
    "let empty;",
    "fn add(a, b) { return a + b }",
    "fn tick() {}",
    "if (ready) { go() } else { wait() }",
    "for item in items { use(item) }",
    "import { render } from \"noteg/html\";",
    "export let version = 1;",
    "template {{ user.name }}",
    "a |> f |> g;",
    "items[0].label;",
    "!done && count != 0;",
    "[1, 2, 3];",
    "({ a: 1, b: 2 });",
    "return;",
];

fn valid_statement() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_STATEMENTS).prop_map(std::string::ToString::to_string)
}

/// A small program assembled from valid statements.
fn valid_program() -> impl Strategy<Value = String> {
    prop::collection::vec(valid_statement(), 0..8).prop_map(|statements| statements.join("\n"))
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Parser never panics on arbitrary input.
    #[test]
    fn parser_never_panics(input in "\\PC{0,500}") {
        let (tokens, _) = lex(&input);
        let _ = parse(tokens);
    }

    /// Property 1b: The full pipeline never panics on arbitrary input.
    #[test]
    fn parse_source_never_panics(input in "\\PC{0,500}") {
        let _ = parse_source(&input);
    }

    /// Property 2: Valid programs parse with no errors, one statement per line.
    #[test]
    fn valid_programs_parse_cleanly(input in valid_program()) {
        let (program, lex_errors, parse_errors) = parse_source(&input);
        prop_assert!(lex_errors.is_empty(), "lex errors for {:?}: {:?}", input, lex_errors);
        prop_assert!(parse_errors.is_empty(), "parse errors for {:?}: {:?}", input, parse_errors);
        let expected = input.lines().filter(|l| !l.is_empty()).count();
        prop_assert_eq!(
            program.statements.len(),
            expected,
            "statement count mismatch for {:?}",
            input,
        );
    }

    /// Property 3: Every reported error has a non-empty message and a
    /// position inside the input's line range.
    #[test]
    fn errors_carry_content(input in "\\PC{0,300}") {
        let (program, _, parse_errors) = parse_source(&input);
        let _ = program;
        let line_count = input.lines().count().max(1) as u32;
        for error in &parse_errors {
            prop_assert!(!error.message.is_empty());
            prop_assert!(error.position().line() >= 1);
            prop_assert!(
                error.position().line() <= line_count + 1,
                "error line {} beyond input ({} lines) for {:?}",
                error.position().line(),
                line_count,
                input,
            );
        }
    }

    /// Property 4: Parsing is deterministic — same input, same result.
    #[test]
    fn parsing_deterministic(input in "\\PC{0,200}") {
        let (program1, lex1, parse1) = parse_source(&input);
        let (program2, lex2, parse2) = parse_source(&input);
        prop_assert_eq!(program1, program2);
        prop_assert_eq!(lex1, lex2);
        prop_assert_eq!(parse1, parse2);
    }
}
