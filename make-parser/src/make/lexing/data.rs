//! The logical-line buffer

use crate::make::ast::location::Location;

/// A single virtual "line", which can be multiple source lines joined with
/// continuations.
///
/// The buffer is append-only. Each appended fragment registers the location
/// of its first character, so any offset can be located by advancing from the
/// nearest preceding fragment start.
#[derive(Debug, Clone, Default)]
pub struct Data {
    text: String,
    breakpoints: Vec<(usize, Location)>,
}

impl Data {
    pub fn new() -> Self {
        Data::default()
    }

    /// A one-fragment buffer, mostly useful for feeding the expansion parser
    /// with text that did not come from the line assembler.
    pub fn from_str(text: &str, location: Location) -> Self {
        let mut data = Data::new();
        data.append(text, location);
        data
    }

    pub fn append(&mut self, fragment: &str, location: Location) {
        self.breakpoints.push((self.text.len(), location));
        self.text.push_str(fragment);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The source location of a byte offset within the buffer.
    ///
    /// Finds the last fragment starting at or before `offset` and advances
    /// its location over the intervening text. Offsets past the end resolve
    /// to the location just past the final character.
    pub fn location_at(&self, offset: usize) -> Location {
        let offset = offset.min(self.text.len());
        let (begin, location) = self
            .breakpoints
            .iter()
            .rev()
            .find(|(start, _)| *start <= offset)
            .expect("data buffer has at least one fragment");
        location.advance(&self.text[*begin..offset])
    }

    /// A new buffer holding the tail of this one from `offset` on, with
    /// location tracking preserved.
    pub fn slice_from(&self, offset: usize) -> Data {
        let offset = offset.min(self.text.len());
        let mut breakpoints = vec![(0, self.location_at(offset))];
        for (start, location) in &self.breakpoints {
            if *start > offset {
                breakpoints.push((*start - offset, location.clone()));
            }
        }
        Data {
            text: self.text[offset..].to_owned(),
            breakpoints,
        }
    }
}
