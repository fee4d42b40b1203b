//! # make-parser
//!
//! A parser for Makefile syntax.
//!
//! Makefiles use a line-based parsing system. Continuations and substitutions
//! are handled differently based on the type of line being parsed:
//!
//! Lines with makefile syntax condense continuations to a single space, no
//! matter the actual trailing whitespace of the first line or the leading
//! whitespace of the continuation. In other situations, trailing whitespace is
//! relevant.
//!
//! Lines with command syntax do not condense continuations: the backslash and
//! newline are part of the command. (GNU make is inconsistent in this regard
//! across platforms; this implementation preserves them exactly.)
//!
//! Lines with an initial tab are commands if they can be (there is a rule or a
//! command immediately preceding). Otherwise, they are parsed as makefile
//! syntax.
//!
//! After splitting data into parseable chunks, a recursive-descent engine with
//! an explicit frame stack nests parenthesized `$(...)` syntax.
//!
//! The crate produces a deferred model: variable values and rule commands are
//! stored as unresolved [expansions](make::ast::expansion::Expansion), to be
//! flattened against a variable/function environment by a separate resolver.

pub mod make;
