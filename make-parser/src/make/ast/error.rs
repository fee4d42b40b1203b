//! Error and warning types for makefile parsing
//!
//!     Fatal errors abort the parse of the whole source unit; no partial
//!     model escapes. Warnings report tolerated oddities and never stop the
//!     parse.

use super::location::Location;
use std::fmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// Fatal syntax errors. Each carries the location the parse died at.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A `$(` (or nested form) was still open at the end of the buffer.
    UnterminatedReference { location: Location },
    /// A function call closed with an argument count outside its bounds.
    WrongArgumentCount {
        location: Location,
        name: String,
        given: usize,
        min: usize,
        max: Option<usize>,
    },
    /// A syntax line with neither an assignment operator nor a rule separator.
    MissingSeparator { location: Location },
    /// An assignment with nothing on the left of the operator.
    EmptyVariableName { location: Location },
    /// A rule separator with nothing on the left of the colon.
    MissingTarget { location: Location },
    /// A `define NAME` block that never saw its `endef`.
    UnterminatedDefine { location: Location, name: String },
    /// An `endef` with no `define` open.
    StrayEndef { location: Location },
}

impl ParseError {
    pub fn location(&self) -> &Location {
        match self {
            ParseError::UnterminatedReference { location }
            | ParseError::WrongArgumentCount { location, .. }
            | ParseError::MissingSeparator { location }
            | ParseError::EmptyVariableName { location }
            | ParseError::MissingTarget { location }
            | ParseError::UnterminatedDefine { location, .. }
            | ParseError::StrayEndef { location } => location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnterminatedReference { location } => {
                write!(f, "{}: unterminated reference", location)
            }
            ParseError::WrongArgumentCount {
                location,
                name,
                given,
                min,
                max,
            } => match max {
                Some(max) if min == max => write!(
                    f,
                    "{}: function `{}` takes {} argument(s), {} given",
                    location, name, min, given
                ),
                Some(max) => write!(
                    f,
                    "{}: function `{}` takes {} to {} arguments, {} given",
                    location, name, min, max, given
                ),
                None => write!(
                    f,
                    "{}: function `{}` takes at least {} argument(s), {} given",
                    location, name, min, given
                ),
            },
            ParseError::MissingSeparator { location } => {
                write!(f, "{}: missing separator", location)
            }
            ParseError::EmptyVariableName { location } => {
                write!(f, "{}: empty variable name", location)
            }
            ParseError::MissingTarget { location } => {
                write!(f, "{}: missing target before separator", location)
            }
            ParseError::UnterminatedDefine { location, name } => {
                write!(f, "{}: missing `endef` for `define {}`", location, name)
            }
            ParseError::StrayEndef { location } => {
                write!(f, "{}: `endef` without matching `define`", location)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Tolerated oddities, reported but never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseWarning {
    /// `$(NAME:PATTERN)` closed without an `=`; parsed as a plain variable
    /// reference named `NAME:PATTERN`.
    SubstitutionWithoutEquals { location: Location, name: String },
}

impl ParseWarning {
    pub fn location(&self) -> &Location {
        match self {
            ParseWarning::SubstitutionWithoutEquals { location, .. } => location,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::SubstitutionWithoutEquals { location, .. } => write!(
                f,
                "{}: variable reference looks like substitution without =",
                location
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_with_location_prefix() {
        let location = Location::new("x.mk", 3, 7);
        let err = ParseError::UnterminatedReference { location };
        assert_eq!(err.to_string(), "x.mk:3:7: unterminated reference");
    }

    #[test]
    fn arity_messages_cover_bounds() {
        let location = Location::new("x.mk", 1, 0);
        let fixed = ParseError::WrongArgumentCount {
            location: location.clone(),
            name: "word".into(),
            given: 1,
            min: 2,
            max: Some(2),
        };
        assert!(fixed.to_string().contains("takes 2 argument(s), 1 given"));

        let open = ParseError::WrongArgumentCount {
            location,
            name: "call".into(),
            given: 0,
            min: 1,
            max: None,
        };
        assert!(open.to_string().contains("at least 1"));
    }
}
