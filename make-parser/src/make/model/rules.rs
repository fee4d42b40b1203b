//! Rule storage
//!
//! Rules live in an arena and are referred to by stable integer ids. A header
//! like `a b: deps` creates one rule shared by both targets; code that needs
//! to know two targets share a rule compares ids, never rule contents.

use crate::make::ast::expansion::Expansion;

/// Stable identity of one rule declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

/// One rule declaration: prerequisites and the commands that accumulate
/// under it. Double-colon rules stay independent of single-colon rules for
/// the same target; the flag is preserved, never flattened away.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub prerequisites: Vec<String>,
    pub target_pattern: Option<String>,
    pub doublecolon: bool,
    pub commands: Vec<Expansion>,
}

#[derive(Debug, Clone, Default)]
pub struct RuleArena {
    rules: Vec<Rule>,
}

impl RuleArena {
    pub fn new() -> Self {
        RuleArena::default()
    }

    pub fn insert(&mut self, rule: Rule) -> RuleId {
        self.rules.push(rule);
        RuleId(self.rules.len() - 1)
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
