//! The expansion tree: a deferred piece of makefile text
//!
//!     An [`Expansion`] is an ordered, immutable-once-built sequence of
//!     elements: literal runs and reference nodes. It represents text that has
//!     been parsed but not resolved; flattening it into final text requires a
//!     variable/function environment, which lives outside this crate.
//!
//!     The four element shapes are a closed set dispatched by pattern match.
//!     Two expansions are distinct objects even when they would resolve to the
//!     same text; identity comparisons happen at the rule level through
//!     [`RuleId`](crate::make::model::rules::RuleId), never here.

use super::location::Location;
use std::fmt;

/// One element of an expansion: a literal run or a reference node.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Literal(String),
    Variable(VariableRef),
    Substitution(SubstitutionRef),
    Call(FunctionCall),
}

/// `$(NAME)` or the single-character shorthand `$N`.
///
/// The name is itself an expansion so that computed names, where a variable's
/// name is another variable's value, stay representable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    pub location: Location,
    pub name: Expansion,
}

/// `$(NAME:PATTERN=REPLACEMENT)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionRef {
    pub location: Location,
    pub name: Expansion,
    pub pattern: Expansion,
    pub replacement: Expansion,
}

/// `$(function arg1,arg2,...)`.
///
/// The name was matched against the function registry when the call was
/// parsed, and the argument count validated when the closing parenthesis was
/// seen. The call body is not interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub location: Location,
    pub name: String,
    pub arguments: Vec<Expansion>,
}

/// An ordered sequence of literal runs and reference nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    elements: Vec<Element>,
}

impl Expansion {
    pub fn new() -> Self {
        Expansion::default()
    }

    pub fn from_literal(text: &str) -> Self {
        let mut expansion = Expansion::new();
        expansion.push_str(text);
        expansion
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The literal text of an expansion that contains no reference nodes.
    pub fn as_literal(&self) -> Option<&str> {
        match self.elements.as_slice() {
            [] => Some(""),
            [Element::Literal(text)] => Some(text),
            _ => None,
        }
    }

    /// Append literal text, coalescing with a trailing literal run.
    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Element::Literal(run)) = self.elements.last_mut() {
            run.push_str(text);
            return;
        }
        self.elements.push(Element::Literal(text.to_owned()));
    }

    pub fn push(&mut self, element: Element) {
        match element {
            Element::Literal(text) => self.push_str(&text),
            other => self.elements.push(other),
        }
    }

    /// Append all of `other`, coalescing literal runs at the boundary.
    pub fn concat(&mut self, other: Expansion) {
        for element in other.elements {
            self.push(element);
        }
    }

    /// Reconstruct source text for this expansion.
    ///
    /// The result is not guaranteed to be byte-identical to the original
    /// input (the `$X`/`$(X)` shorthand collapses, for one), but re-parsing it
    /// yields an equivalent tree, which is what the serialization bridge
    /// needs to re-emit command strings.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                Element::Literal(text) => out.push_str(&text.replace('$', "$$")),
                Element::Variable(var) => {
                    let name = var.name.to_source();
                    if name.chars().count() == 1 && name != "$" {
                        out.push('$');
                        out.push_str(&name);
                    } else {
                        out.push_str("$(");
                        out.push_str(&name);
                        out.push(')');
                    }
                }
                Element::Substitution(subst) => {
                    out.push_str("$(");
                    out.push_str(&subst.name.to_source());
                    out.push(':');
                    out.push_str(&subst.pattern.to_source());
                    out.push('=');
                    out.push_str(&subst.replacement.to_source());
                    out.push(')');
                }
                Element::Call(call) => {
                    out.push_str("$(");
                    out.push_str(&call.name);
                    out.push(' ');
                    let args: Vec<String> =
                        call.arguments.iter().map(Expansion::to_source).collect();
                    out.push_str(&args.join(","));
                    out.push(')');
                }
            }
        }
        out
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}
