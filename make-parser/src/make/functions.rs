//! Registry of known make function names
//!
//! The expansion parser only needs two things from a function: whether the
//! name exists, and how many arguments it accepts. Function bodies are
//! resolved by the environment collaborator, not here. The registry is an
//! explicitly constructed value passed by reference, so isolated parses can
//! run against different (or empty) function sets.

use crate::make::ast::error::ParseError;
use crate::make::ast::expansion::{Expansion, FunctionCall};
use crate::make::ast::location::Location;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Declared argument bounds for one function name. `max_args` of `None`
/// means variadic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub min_args: usize,
    pub max_args: Option<usize>,
}

/// Mapping from lowercase identifier to declared arity.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    specs: HashMap<String, FunctionSpec>,
}

impl FunctionRegistry {
    /// An empty registry: every `$(name ...)` parses as a variable reference.
    pub fn new() -> Self {
        FunctionRegistry::default()
    }

    pub fn register(&mut self, name: &str, min_args: usize, max_args: Option<usize>) {
        self.specs
            .insert(name.to_owned(), FunctionSpec { min_args, max_args });
    }

    pub fn lookup(&self, name: &str) -> Option<FunctionSpec> {
        self.specs.get(name).copied()
    }

    /// Start collecting a call for a registered name.
    pub fn builder(&self, name: &str, location: Location) -> Option<FunctionCallBuilder> {
        let spec = self.lookup(name)?;
        Some(FunctionCallBuilder {
            name: name.to_owned(),
            spec,
            location,
            arguments: Vec::new(),
        })
    }

    /// The standard function set with GNU-style arities.
    pub fn standard() -> Self {
        let mut registry = FunctionRegistry::new();
        let fixed: &[(&str, usize)] = &[
            ("strip", 1),
            ("sort", 1),
            ("words", 1),
            ("firstword", 1),
            ("dir", 1),
            ("notdir", 1),
            ("suffix", 1),
            ("basename", 1),
            ("wildcard", 1),
            ("realpath", 1),
            ("abspath", 1),
            ("value", 1),
            ("origin", 1),
            ("flavor", 1),
            ("shell", 1),
            ("error", 1),
            ("warning", 1),
            ("info", 1),
            ("eval", 1),
            ("findstring", 2),
            ("filter", 2),
            ("filter-out", 2),
            ("word", 2),
            ("join", 2),
            ("addsuffix", 2),
            ("addprefix", 2),
            ("subst", 3),
            ("patsubst", 3),
            ("wordlist", 3),
            ("foreach", 3),
        ];
        for (name, arity) in fixed {
            registry.register(name, *arity, Some(*arity));
        }
        registry.register("if", 2, Some(3));
        registry.register("and", 1, None);
        registry.register("or", 1, None);
        registry.register("call", 1, None);
        registry
    }
}

/// The stock registry used when callers don't supply their own.
pub static STANDARD_FUNCTIONS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::standard);

/// Collects the arguments of one `$(function ...)` call as they are parsed.
///
/// Arity is validated when the closing parenthesis is seen, through
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct FunctionCallBuilder {
    name: String,
    spec: FunctionSpec,
    location: Location,
    arguments: Vec<Expansion>,
}

impl FunctionCallBuilder {
    pub fn push_argument(&mut self, argument: Expansion) {
        self.arguments.push(argument);
    }

    pub fn finish(self) -> Result<FunctionCall, ParseError> {
        let given = self.arguments.len();
        let min = self.spec.min_args;
        let max = self.spec.max_args;
        if given < min || max.is_some_and(|max| given > max) {
            return Err(ParseError::WrongArgumentCount {
                location: self.location,
                name: self.name,
                given,
                min,
                max,
            });
        }
        Ok(FunctionCall {
            location: self.location,
            name: self.name,
            arguments: self.arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new("test.mk", 1, 0)
    }

    #[test]
    fn standard_set_knows_wildcard() {
        assert!(STANDARD_FUNCTIONS.lookup("wildcard").is_some());
        assert!(STANDARD_FUNCTIONS.lookup("wildcardx").is_none());
    }

    #[test]
    fn builder_enforces_fixed_arity() {
        let mut builder = STANDARD_FUNCTIONS.builder("word", loc()).unwrap();
        builder.push_argument(Expansion::from_literal("2"));
        let err = builder.finish().unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongArgumentCount { given: 1, min: 2, .. }
        ));

        let mut builder = STANDARD_FUNCTIONS.builder("word", loc()).unwrap();
        builder.push_argument(Expansion::from_literal("2"));
        builder.push_argument(Expansion::from_literal("a b c"));
        assert!(builder.finish().is_ok());
    }

    #[test]
    fn variadic_upper_bound_is_open() {
        let mut builder = STANDARD_FUNCTIONS.builder("call", loc()).unwrap();
        for _ in 0..7 {
            builder.push_argument(Expansion::from_literal("x"));
        }
        assert!(builder.finish().is_ok());
    }

    #[test]
    fn if_takes_two_or_three() {
        let mut builder = STANDARD_FUNCTIONS.builder("if", loc()).unwrap();
        builder.push_argument(Expansion::from_literal("c"));
        builder.push_argument(Expansion::from_literal("t"));
        builder.push_argument(Expansion::from_literal("f"));
        builder.push_argument(Expansion::from_literal("x"));
        assert!(builder.finish().is_err());
    }
}
