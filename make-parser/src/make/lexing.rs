//! Logical-line assembly
//!
//!     This module turns raw makefile text into logical lines. A logical line
//!     is one or more physical lines joined by continuation rules, carried in
//!     a [`Data`](data::Data) buffer that can map any offset back to its
//!     source location.
//!
//! The Assembly Pipeline
//!
//!     1. Physical lines are split on line terminators, with `\r\n`
//!        normalized to `\n` up front.
//!
//!     2. Each logical line starts with a classification: a leading literal
//!        tab while a rule is open makes a COMMAND line, anything else a
//!        SYNTAX line. The rule-open flag belongs to the stream driver and is
//!        passed in per call; a stray leading tab outside a rule body is
//!        ordinary syntax, never an error.
//!
//!     3. SYNTAX lines get comments stripped and leading whitespace removed
//!        (with tab-aware column bookkeeping), then continuations collapse to
//!        a single space. COMMAND lines keep everything: the backslash and
//!        newline of a continuation are part of the command.
//!
//!     Offsets into the assembled buffer remain traceable to physical lines
//!     because every appended fragment registers its own start location.

pub mod assembly;
pub mod continuation;
pub mod data;

pub use assembly::{LineAssembler, LineKind, LogicalLine};
pub use data::Data;
