//! Integration tests for the expansion parser
//!
//! Covers the parser's observable contract: literal text passes through,
//! `$$` escapes, substitution references, the function/variable lookahead,
//! stop sets, and the fatal error cases.

use make_parser::make::ast::error::{ParseError, ParseWarning};
use make_parser::make::ast::expansion::Element;
use make_parser::make::functions::STANDARD_FUNCTIONS;
use make_parser::make::parsing::expansion::parse_expansion;
use make_parser::make::testing::{assert_expansion, data, parse};
use rstest::rstest;

#[rstest]
#[case("plain text with no dollars")]
#[case("objects = main.o utils.o")]
#[case("punctuation: (parens) and, commas")]
fn literal_text_parses_to_itself(#[case] text: &str) {
    let parsed = parse(text);
    assert!(parsed.stop_offset.is_none());
    assert!(parsed.warnings.is_empty());
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .literal(0, text);
}

#[test]
fn double_dollar_is_a_literal_dollar() {
    let parsed = parse("a$$b");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .literal(0, "a$b");
}

#[test]
fn double_dollar_escapes_inside_function_arguments() {
    let parsed = parse("$(strip $$x)");
    match &parsed.expansion.elements()[0] {
        Element::Call(call) => {
            assert_eq!(call.arguments[0].as_literal(), Some("$x"));
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn substitution_reference_parses() {
    let parsed = parse("$(CC:.c=.o)");
    assert!(parsed.warnings.is_empty());
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .substitution(0, "CC", ".c", ".o");
}

#[test]
fn substitution_without_equals_warns_and_falls_back() {
    let parsed = parse("$(CC:.c)");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .variable(0, "CC:.c");
    assert_eq!(parsed.warnings.len(), 1);
    assert!(matches!(
        parsed.warnings[0],
        ParseWarning::SubstitutionWithoutEquals { .. }
    ));
}

#[test]
fn registered_function_name_builds_a_call() {
    let parsed = parse("$(wildcard *.c)");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .call(0, "wildcard", &["*.c"]);
}

#[rstest]
#[case("$(wildcardx *.c)", "wildcardx")]
#[case("$(WILDCARD *.c)", "WILDCARD")]
fn unregistered_name_is_a_variable_reference(#[case] text: &str, #[case] prefix: &str) {
    // the lookahead alone decides; there is no retry between interpretations
    let parsed = parse(text);
    match &parsed.expansion.elements()[0] {
        Element::Variable(var) => {
            assert!(var.name.to_source().starts_with(prefix));
        }
        other => panic!("expected a variable reference, got {:?}", other),
    }
}

#[test]
fn function_name_without_whitespace_is_a_variable() {
    let parsed = parse("$(wildcard)");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .variable(0, "wildcard");
}

#[test]
fn unterminated_reference_is_fatal() {
    let error = parse_expansion(&data("$(FOO"), &STANDARD_FUNCTIONS, "").unwrap_err();
    match error {
        ParseError::UnterminatedReference { location } => {
            assert_eq!(location.line, 1);
            assert_eq!(location.column, 4);
        }
        other => panic!("expected UnterminatedReference, got {:?}", other),
    }
}

#[test]
fn unterminated_nested_reference_is_fatal() {
    let error = parse_expansion(&data("$(strip $(X)"), &STANDARD_FUNCTIONS, "").unwrap_err();
    assert!(matches!(error, ParseError::UnterminatedReference { .. }));
}

#[test]
fn arity_violation_is_fatal() {
    let error = parse_expansion(&data("$(word one)"), &STANDARD_FUNCTIONS, "").unwrap_err();
    match error {
        ParseError::WrongArgumentCount {
            name,
            given,
            min,
            location,
            ..
        } => {
            assert_eq!(name, "word");
            assert_eq!(given, 1);
            assert_eq!(min, 2);
            assert_eq!(location.column, 0);
        }
        other => panic!("expected WrongArgumentCount, got {:?}", other),
    }
}

#[test]
fn stop_characters_halt_the_top_level() {
    let parsed = parse_expansion(&data("CC := gcc"), &STANDARD_FUNCTIONS, "=:").unwrap();
    assert_eq!(parsed.stop_offset, Some(3));
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .literal(0, "CC ");
}

#[test]
fn stop_characters_inside_references_do_not_halt() {
    let parsed = parse_expansion(&data("$(A:x=y) : rest"), &STANDARD_FUNCTIONS, ":").unwrap();
    assert_eq!(parsed.stop_offset, Some(9));
    assert_expansion(&parsed.expansion).substitution(0, "A", "x", "y");
}

#[test]
fn single_character_shorthand_consumes_one_character() {
    let parsed = parse("$Xab");
    assert_expansion(&parsed.expansion)
        .element_count(2)
        .variable(0, "X")
        .literal(1, "ab");

    let parsed = parse("$@");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .variable(0, "@");
}

#[test]
fn computed_names_stay_nested() {
    let parsed = parse("$($(V))");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .variable(0, "$(V)");
}

#[test]
fn whitespace_before_first_argument_is_skipped() {
    let parsed = parse("$(strip    abc)");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .call(0, "strip", &["abc"]);
}

#[test]
fn commas_split_function_arguments() {
    let parsed = parse("$(subst a,b,some text)");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .call(0, "subst", &["a", "b", "some text"]);
}

#[test]
fn calls_nest_inside_calls() {
    let parsed = parse("$(strip $(wildcard *.c))");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .call(0, "strip", &["$(wildcard *.c)"]);
}

#[test]
fn trailing_dollar_is_literal() {
    let parsed = parse("abc$");
    assert_expansion(&parsed.expansion)
        .element_count(1)
        .literal(0, "abc$");
}

#[test]
fn deep_nesting_does_not_recurse() {
    // the frame stack grows on the heap, so pathological nesting is fine
    let mut text = String::new();
    for _ in 0..10_000 {
        text.push_str("$(");
    }
    text.push('X');
    for _ in 0..10_000 {
        text.push(')');
    }
    let parsed = parse_expansion(&data(&text), &STANDARD_FUNCTIONS, "").unwrap();
    assert_eq!(parsed.expansion.elements().len(), 1);
}
