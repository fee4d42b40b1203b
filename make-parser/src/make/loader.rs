//! Makefile loading utilities
//!
//! `MakefileLoader` loads source text from a file or a string and parses it
//! into a [`Makefile`] model, used by both production code and tests.

use crate::make::ast::error::ParseError;
use crate::make::functions::{FunctionRegistry, STANDARD_FUNCTIONS};
use crate::make::model::makefile::Makefile;
use crate::make::parsing::stream::parse_source;
use std::fs;
use std::path::Path;

/// Error that can occur when loading makefiles.
#[derive(Debug)]
pub enum LoaderError {
    /// IO error when reading the file
    Io(String),
    /// Fatal syntax error during parsing
    Parse(ParseError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::Io(message) => write!(f, "IO error: {}", message),
            LoaderError::Parse(error) => write!(f, "Parse error: {}", error),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        LoaderError::Io(error.to_string())
    }
}

impl From<ParseError> for LoaderError {
    fn from(error: ParseError) -> Self {
        LoaderError::Parse(error)
    }
}

/// Loads source text and parses it against a function registry.
///
/// # Example
///
/// ```rust
/// use make_parser::make::loader::MakefileLoader;
///
/// let makefile = MakefileLoader::from_string("CC = gcc\n")
///     .parse()
///     .unwrap();
/// assert!(makefile.variables.get("CC").is_some());
/// ```
#[derive(Debug)]
pub struct MakefileLoader {
    source: String,
    path: String,
    registry: Option<FunctionRegistry>,
}

impl MakefileLoader {
    /// Load from a file path. The path becomes the source identifier carried
    /// by every location in the parsed model.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(&path)?;
        Ok(MakefileLoader {
            source,
            path: path.as_ref().display().to_string(),
            registry: None,
        })
    }

    /// Load from a string.
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        MakefileLoader {
            source: source.into(),
            path: "<string>".to_owned(),
            registry: None,
        }
    }

    /// Parse against a custom function registry instead of the standard set.
    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn parse(&self) -> Result<Makefile, LoaderError> {
        let registry = self.registry.as_ref().unwrap_or(&STANDARD_FUNCTIONS);
        Ok(parse_source(&self.source, &self.path, registry)?)
    }
}
