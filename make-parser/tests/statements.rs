//! Integration tests for the statement grammar and the resulting model

use make_parser::make::ast::error::ParseError;
use make_parser::make::functions::STANDARD_FUNCTIONS;
use make_parser::make::model::variables::{Flavor, Source};
use make_parser::make::parsing::stream::parse_source;
use rstest::rstest;

fn parse(source: &str) -> make_parser::make::model::makefile::Makefile {
    parse_source(source, "test.mk", &STANDARD_FUNCTIONS)
        .unwrap_or_else(|error| panic!("parse failed: {}", error))
}

#[rstest]
#[case("CC = gcc\n", Flavor::Recursive)]
#[case("CC := gcc\n", Flavor::Simple)]
fn assignment_operators_select_flavor(#[case] source: &str, #[case] flavor: Flavor) {
    let makefile = parse(source);
    let entry = makefile.variables.get("CC").unwrap();
    assert_eq!(entry.flavor, flavor);
    assert_eq!(entry.value.as_literal(), Some("gcc"));
    assert_eq!(entry.source, Source::Makefile);
}

#[test]
fn append_concatenates() {
    let makefile = parse("FLAGS = -O2\nFLAGS += -g\n");
    let entry = makefile.variables.get("FLAGS").unwrap();
    assert_eq!(entry.value.as_literal(), Some("-O2 -g"));
}

#[test]
fn conditional_assignment_keeps_the_first_value() {
    let makefile = parse("A ?= one\nA ?= two\n");
    assert_eq!(
        makefile.variables.get("A").unwrap().value.as_literal(),
        Some("one")
    );
}

#[test]
fn override_wins_over_later_makefile_assignment() {
    let makefile = parse("override A = kept\nA = ignored\n");
    let entry = makefile.variables.get("A").unwrap();
    assert_eq!(entry.source, Source::Override);
    assert_eq!(entry.value.as_literal(), Some("kept"));
}

#[test]
fn value_leading_whitespace_is_dropped() {
    let makefile = parse("A =    spaced value\n");
    assert_eq!(
        makefile.variables.get("A").unwrap().value.as_literal(),
        Some("spaced value")
    );
}

#[test]
fn values_parse_into_reference_trees() {
    let makefile = parse("OBJS = $(SRCS:.c=.o) extra.o\n");
    let value = &makefile.variables.get("OBJS").unwrap().value;
    assert_eq!(value.to_source(), "$(SRCS:.c=.o) extra.o");
}

#[test]
fn define_block_keeps_newlines_and_references() {
    let makefile = parse("define SCRIPT\necho $(OUT)\necho two\nendef\n");
    let entry = makefile.variables.get("SCRIPT").unwrap();
    assert_eq!(entry.flavor, Flavor::Recursive);
    assert_eq!(entry.value.to_source(), "echo $(OUT)\necho two");
}

#[test]
fn define_body_is_verbatim() {
    // no comment stripping, no continuation joining inside the body
    let makefile = parse("define RAW\nkeep # this\na \\\nb\nendef\n");
    let entry = makefile.variables.get("RAW").unwrap();
    assert_eq!(entry.value.to_source(), "keep # this\na \\\nb");
}

#[test]
fn unterminated_define_is_fatal() {
    let error =
        parse_source("define X\nbody\n", "test.mk", &STANDARD_FUNCTIONS).unwrap_err();
    assert!(matches!(error, ParseError::UnterminatedDefine { .. }));
}

#[test]
fn stray_endef_is_fatal() {
    let error = parse_source("endef\n", "test.mk", &STANDARD_FUNCTIONS).unwrap_err();
    assert!(matches!(error, ParseError::StrayEndef { .. }));
}

#[test]
fn empty_variable_name_is_fatal() {
    let error = parse_source(" = 1\n", "test.mk", &STANDARD_FUNCTIONS).unwrap_err();
    assert!(matches!(error, ParseError::EmptyVariableName { .. }));
}

#[test]
fn separator_less_line_is_fatal() {
    let error = parse_source("just some words\n", "test.mk", &STANDARD_FUNCTIONS).unwrap_err();
    match error {
        ParseError::MissingSeparator { location } => {
            assert_eq!(location.line, 1);
        }
        other => panic!("expected MissingSeparator, got {:?}", other),
    }
}

#[test]
fn rule_header_collects_targets_and_prereqs() {
    let makefile = parse("all install: build deps\n");
    let ids = makefile.rules_for("all");
    assert_eq!(ids, makefile.rules_for("install"));
    let rule = makefile.rule(ids[0]).unwrap();
    assert_eq!(rule.prerequisites, ["build", "deps"]);
    assert!(!rule.doublecolon);
}

#[test]
fn double_colon_rules_stay_independent() {
    let makefile = parse("t: a\n\techo one\nt:: b\n\techo two\n");
    let ids = makefile.rules_for("t");
    assert_eq!(ids.len(), 2);
    let first = makefile.rule(ids[0]).unwrap();
    let second = makefile.rule(ids[1]).unwrap();
    assert!(!first.doublecolon);
    assert!(second.doublecolon);
    // neither prerequisites nor commands merged
    assert_eq!(first.prerequisites, ["a"]);
    assert_eq!(second.prerequisites, ["b"]);
    assert_eq!(first.commands.len(), 1);
    assert_eq!(second.commands.len(), 1);
}

#[test]
fn static_pattern_rules_keep_their_pattern() {
    let makefile = parse("objects : %.o : %.c\n\tcc -c $<\n");
    let rule = makefile.rule(makefile.rules_for("objects")[0]).unwrap();
    assert_eq!(rule.target_pattern.as_deref(), Some("%.o"));
    assert_eq!(rule.prerequisites, ["%.c"]);
}

#[test]
fn semicolon_starts_the_first_command_inline() {
    let makefile = parse("t: dep ; echo inline\n\techo second\n");
    let rule = makefile.rule(makefile.rules_for("t")[0]).unwrap();
    assert_eq!(rule.prerequisites, ["dep"]);
    assert_eq!(rule.commands.len(), 2);
    assert_eq!(rule.commands[0].to_source(), "echo inline");
    assert_eq!(rule.commands[1].to_source(), "echo second");
}

#[test]
fn targets_may_be_references() {
    let makefile = parse("$(BIN): main.o\n");
    let order: Vec<&str> = makefile.targets().map(|(name, _)| name).collect();
    assert_eq!(order, ["$(BIN)"]);
}

#[test]
fn malformed_substitution_warning_reaches_the_model() {
    let makefile = parse("A = $(CC:.c)\n");
    assert_eq!(makefile.warnings.len(), 1);
}

#[test]
fn fatal_errors_abort_the_whole_source() {
    // the valid assignment before the bad line does not survive
    let result = parse_source("GOOD = 1\n$(broken\n", "test.mk", &STANDARD_FUNCTIONS);
    assert!(result.is_err());
}
