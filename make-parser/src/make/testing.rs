//! Test support for expansion assertions
//!
//!     Hand-matching expansion trees in every test gets verbose and the
//!     failure output is useless. The helpers here give tests a compact,
//!     fluent way to assert the shape of an expansion and report what was
//!     actually there when an assertion fails.
//!
//!     ```rust,ignore
//!     let parsed = parse("$(CC:.c=.o) done");
//!     assert_expansion(&parsed.expansion)
//!         .element_count(2)
//!         .substitution(0, "CC", ".c", ".o")
//!         .literal(1, " done");
//!     ```

use crate::make::ast::expansion::{Element, Expansion};
use crate::make::ast::location::Location;
use crate::make::functions::STANDARD_FUNCTIONS;
use crate::make::lexing::data::Data;
use crate::make::parsing::expansion::{parse_expansion, ParsedExpansion};

/// A one-fragment buffer at line 1, column 0 of `test.mk`.
pub fn data(text: &str) -> Data {
    Data::from_str(text, Location::new("test.mk", 1, 0))
}

/// Parse `text` fully against the standard function registry, panicking on
/// fatal errors. Tests that expect errors call the parser directly.
pub fn parse(text: &str) -> ParsedExpansion {
    parse_expansion(&data(text), &STANDARD_FUNCTIONS, "")
        .unwrap_or_else(|error| panic!("parse of {:?} failed: {}", text, error))
}

pub fn assert_expansion(expansion: &Expansion) -> ExpansionAssert<'_> {
    ExpansionAssert { expansion }
}

/// Fluent assertions over one expansion's elements.
pub struct ExpansionAssert<'a> {
    expansion: &'a Expansion,
}

impl<'a> ExpansionAssert<'a> {
    pub fn element_count(self, expected: usize) -> Self {
        let actual = self.expansion.elements().len();
        assert_eq!(
            actual, expected,
            "expected {} element(s), found {} in {:?}",
            expected, actual, self.expansion
        );
        self
    }

    fn element(&self, index: usize) -> &'a Element {
        self.expansion
            .elements()
            .get(index)
            .unwrap_or_else(|| panic!("no element {} in {:?}", index, self.expansion))
    }

    pub fn literal(self, index: usize, expected: &str) -> Self {
        match self.element(index) {
            Element::Literal(text) => assert_eq!(text, expected, "literal at {}", index),
            other => panic!("element {} is not a literal: {:?}", index, other),
        }
        self
    }

    pub fn variable(self, index: usize, expected_name: &str) -> Self {
        match self.element(index) {
            Element::Variable(var) => {
                assert_eq!(var.name.to_source(), expected_name, "name at {}", index)
            }
            other => panic!("element {} is not a variable reference: {:?}", index, other),
        }
        self
    }

    pub fn substitution(
        self,
        index: usize,
        name: &str,
        pattern: &str,
        replacement: &str,
    ) -> Self {
        match self.element(index) {
            Element::Substitution(subst) => {
                assert_eq!(subst.name.to_source(), name, "name at {}", index);
                assert_eq!(subst.pattern.to_source(), pattern, "pattern at {}", index);
                assert_eq!(
                    subst.replacement.to_source(),
                    replacement,
                    "replacement at {}",
                    index
                );
            }
            other => panic!("element {} is not a substitution: {:?}", index, other),
        }
        self
    }

    pub fn call(self, index: usize, name: &str, arguments: &[&str]) -> Self {
        match self.element(index) {
            Element::Call(call) => {
                assert_eq!(call.name, name, "function name at {}", index);
                let actual: Vec<String> =
                    call.arguments.iter().map(Expansion::to_source).collect();
                assert_eq!(actual, arguments, "arguments at {}", index);
            }
            other => panic!("element {} is not a function call: {:?}", index, other),
        }
        self
    }
}
