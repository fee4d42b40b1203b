//! Parsing
//!
//!     Three layers sit on top of the line assembler:
//!
//!         1. The [expansion parser](expansion): a stack-based engine that
//!            turns one buffer into an expansion tree, halting at caller
//!            supplied stop characters.
//!
//!         2. The [statement grammar](grammar): interprets one syntax line
//!            as an assignment, a `define`, or a rule header, reusing the
//!            expansion parser with `=`/`:` stop sets.
//!
//!         3. The [stream driver](stream): owns the open-rule state, routes
//!            command lines into the open rule and syntax lines into the
//!            grammar, and makes the parse of one source unit atomic.

pub mod expansion;
pub mod grammar;
pub mod stream;

pub use expansion::{parse_expansion, ParsedExpansion};
pub use grammar::{parse_statement, StatementOutcome};
pub use stream::parse_source;
