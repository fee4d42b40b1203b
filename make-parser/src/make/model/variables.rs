//! Variable table with flavor and source precedence

use crate::make::ast::expansion::Expansion;
use std::collections::HashMap;

/// How a variable's stored value behaves.
///
/// Recursive values are re-resolved on every use; Simple values are fixed at
/// assignment time (by the resolver collaborator); Append marks the `+=`
/// operation, which concatenates under the existing entry's flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Recursive,
    Simple,
    Append,
}

/// Where a definition came from. Numerically lower sources win when a name
/// is set more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Override = 0,
    CommandLine = 1,
    Makefile = 2,
    Environment = 3,
    Automatic = 4,
    Implicit = 5,
}

#[derive(Debug, Clone)]
pub struct VariableEntry {
    pub name: String,
    pub flavor: Flavor,
    pub source: Source,
    pub value: Expansion,
}

/// Insertion-order-preserving map from name to variable entry.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: Vec<VariableEntry>,
    index: HashMap<String, usize>,
}

impl Variables {
    pub fn new() -> Self {
        Variables::default()
    }

    /// Set a variable, honoring source precedence: an existing definition
    /// from a stronger (numerically lower) source is left alone. Equal
    /// sources replace, so a makefile reassignment wins over the earlier one.
    pub fn set(&mut self, name: &str, flavor: Flavor, source: Source, value: Expansion) {
        match self.index.get(name) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                if source <= entry.source {
                    entry.flavor = flavor;
                    entry.source = source;
                    entry.value = value;
                }
            }
            None => {
                self.index.insert(name.to_owned(), self.entries.len());
                self.entries.push(VariableEntry {
                    name: name.to_owned(),
                    flavor,
                    source,
                    value,
                });
            }
        }
    }

    /// `?=`: define only when the name is not already set.
    pub fn set_conditional(&mut self, name: &str, source: Source, value: Expansion) {
        if !self.index.contains_key(name) {
            self.set(name, Flavor::Recursive, source, value);
        }
    }

    /// `+=`: concatenate onto an existing entry (single space between),
    /// keeping its flavor. Appending to an unset name defines it recursive.
    pub fn append(&mut self, name: &str, source: Source, value: Expansion) {
        match self.index.get(name) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                entry.value.push_str(" ");
                entry.value.concat(value);
            }
            None => self.set(name, Flavor::Recursive, source, value),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariableEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
