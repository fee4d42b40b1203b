//! Expansion model, source locations and diagnostics
//!
//!     This module holds the value types the parser produces: source
//!     [locations](location::Location) with tab-aware column arithmetic, the
//!     [expansion](expansion::Expansion) tree representing a deferred piece of
//!     makefile text, the error and warning types, and the serializable
//!     [snapshot](snapshot::ModelSnapshot) of a loaded model.
//!
//! How Location Tracking Works
//!
//!     Every fragment appended to a logical-line buffer records the location
//!     of its first character. Locating an arbitrary offset means finding the
//!     last recorded fragment start at or before the offset and advancing its
//!     location over the intervening text, one column per character except for
//!     tabs, which snap to the next tab stop.
//!
//!     Reference nodes in the expansion tree carry the location of their
//!     opening `$`, so diagnostics and downstream tooling can point back into
//!     the original makefile even after lines have been joined.

pub mod error;
pub mod expansion;
pub mod location;
pub mod snapshot;

pub use error::{ParseError, ParseWarning};
pub use expansion::{Element, Expansion, FunctionCall, SubstitutionRef, VariableRef};
pub use location::{Location, TAB_WIDTH};
pub use snapshot::{ModelSnapshot, RuleSnapshot};
