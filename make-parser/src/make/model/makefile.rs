//! The loaded model: variables, rules, targets and collected warnings

use super::rules::{Rule, RuleArena, RuleId};
use super::variables::Variables;
use crate::make::ast::error::ParseWarning;
use crate::make::ast::expansion::Expansion;
use std::collections::HashMap;

/// Everything one parsed source unit produced.
///
/// Target iteration follows first-appearance order, and each target maps to
/// the ordered list of rule declarations naming it.
#[derive(Debug, Clone, Default)]
pub struct Makefile {
    pub variables: Variables,
    arena: RuleArena,
    target_order: Vec<String>,
    targets: HashMap<String, Vec<RuleId>>,
    pub warnings: Vec<ParseWarning>,
}

impl Makefile {
    pub fn new() -> Self {
        Makefile::default()
    }

    /// Record one rule declaration and attach it to each of its targets.
    /// All the targets share the same rule, which is what lets the
    /// serialization bridge re-merge `a b: deps` into a single entry.
    pub fn begin_rule(
        &mut self,
        targets: Vec<String>,
        prerequisites: Vec<String>,
        target_pattern: Option<String>,
        doublecolon: bool,
    ) -> RuleId {
        let id = self.arena.insert(Rule {
            prerequisites,
            target_pattern,
            doublecolon,
            commands: Vec::new(),
        });
        for target in targets {
            self.attach(target, id);
        }
        id
    }

    fn attach(&mut self, target: String, id: RuleId) {
        match self.targets.get_mut(&target) {
            Some(ids) => ids.push(id),
            None => {
                self.target_order.push(target.clone());
                self.targets.insert(target, vec![id]);
            }
        }
    }

    pub fn add_command(&mut self, id: RuleId, command: Expansion) {
        if let Some(rule) = self.arena.get_mut(id) {
            rule.commands.push(command);
        }
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.arena.get(id)
    }

    /// Targets in first-appearance order, each with its rule ids.
    pub fn targets(&self) -> impl Iterator<Item = (&str, &[RuleId])> {
        self.target_order.iter().map(move |name| {
            let ids = self
                .targets
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (name.as_str(), ids)
        })
    }

    pub fn rules_for(&self, target: &str) -> &[RuleId] {
        self.targets
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
