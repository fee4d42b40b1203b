//! The loaded makefile model
//!
//!     Variables, rules and the target table, as built by the statement
//!     grammar. Everything in here is deferred: variable values and rule
//!     commands are unresolved expansions, flattened later by an external
//!     environment. The model is replaced wholesale on reload, never mutated
//!     in place after a parse finishes.

pub mod makefile;
pub mod rules;
pub mod variables;

pub use makefile::Makefile;
pub use rules::{Rule, RuleArena, RuleId};
pub use variables::{Flavor, Source, VariableEntry, Variables};
