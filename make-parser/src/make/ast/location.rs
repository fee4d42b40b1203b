//! Source locations and tab-aware column arithmetic

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Tab stops are every four columns.
pub const TAB_WIDTH: usize = 4;

/// A location within a makefile.
///
/// For the moment, locations are just path/line/column, but in the future
/// they may reference parent locations for more accurate "included from"
/// error reporting. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(path: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Location {
            path: path.into(),
            line,
            column,
        }
    }

    /// The location reached after reading `text`, on the same line.
    ///
    /// A tab snaps the column forward to the next multiple of [`TAB_WIDTH`];
    /// any other character advances the column by exactly one.
    pub fn advance(&self, text: &str) -> Location {
        let column = text.chars().fold(self.column, advance_column);
        if column == self.column {
            return self.clone();
        }
        Location {
            path: Arc::clone(&self.path),
            line: self.line,
            column,
        }
    }
}

/// Column position after one perhaps-tab character.
pub(crate) fn advance_column(column: usize, ch: char) -> usize {
    if ch != '\t' {
        return column + 1;
    }
    column + TAB_WIDTH - column % TAB_WIDTH
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

// Diagnostics sort by line then column; the path only breaks ties so that
// ordering stays consistent with equality.
impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column, self.path.as_ref()).cmp(&(
            other.line,
            other.column,
            other.path.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_plain_characters() {
        let loc = Location::new("test.mk", 1, 0);
        assert_eq!(loc.advance("abc").column, 3);
    }

    #[test]
    fn tab_snaps_to_next_stop() {
        let loc = Location::new("test.mk", 1, 0);
        // tab takes 0 to 4, then `a` advances to 5
        assert_eq!(loc.advance("\ta").column, 5);

        let loc = Location::new("test.mk", 1, 3);
        assert_eq!(loc.advance("\t").column, 4);
        let loc = Location::new("test.mk", 1, 4);
        assert_eq!(loc.advance("\t").column, 8);
    }

    #[test]
    fn advance_by_nothing_is_identity() {
        let loc = Location::new("test.mk", 7, 2);
        assert_eq!(loc.advance(""), loc);
    }

    #[test]
    fn ordered_by_line_then_column() {
        let early = Location::new("a.mk", 1, 9);
        let late = Location::new("a.mk", 2, 0);
        assert!(early < late);
        assert!(Location::new("a.mk", 2, 1) > late);
    }

    #[test]
    fn displays_path_line_column() {
        assert_eq!(Location::new("dir/x.mk", 12, 4).to_string(), "dir/x.mk:12:4");
    }
}
