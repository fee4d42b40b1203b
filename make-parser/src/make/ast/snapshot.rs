//! Model snapshot: the serializable interchange form of a parsed makefile
//!
//!     A canonical document with a `variables` mapping and a `rules`
//!     sequence, round-trippable through YAML (or JSON). Variable values and
//!     commands are emitted as reconstructed source text, so re-parsing a
//!     snapshot yields an equivalent model.
//!
//!     Rules are deduplicated by identity: a header like `a b: deps` parsed
//!     into one shared rule comes back out as a single entry listing both
//!     targets. Command-less rules for the same target fold together,
//!     extending prerequisites.

use crate::make::ast::error::ParseError;
use crate::make::functions::FunctionRegistry;
use crate::make::model::makefile::Makefile;
use crate::make::model::rules::RuleId;
use crate::make::model::variables::Source;
use crate::make::parsing::stream::parse_source;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// One rule entry of the interchange document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub targets: Vec<String>,
    pub doublecolon: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prereqs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targetpattern: Option<String>,
    pub commands: Vec<String>,
}

/// The interchange document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelSnapshot {
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub variables: Mapping,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleSnapshot>,
}

impl ModelSnapshot {
    /// Snapshot a parsed model.
    ///
    /// Only variables from explicit sources (override, command line,
    /// makefile) are exported; environment and automatic variables belong to
    /// the process that resolves the model, not the document.
    pub fn from_makefile(makefile: &Makefile) -> Self {
        let mut snapshot = ModelSnapshot::default();

        for entry in makefile.variables.iter() {
            let exported = matches!(
                entry.source,
                Source::Override | Source::CommandLine | Source::Makefile
            );
            if exported {
                snapshot.variables.insert(
                    Value::String(entry.name.clone()),
                    Value::String(entry.value.to_source()),
                );
            }
        }

        // seen rule -> index in snapshot.rules; command-less rules fold by
        // target name instead
        let mut by_rule: HashMap<RuleId, usize> = HashMap::new();
        let mut empty_by_target: HashMap<String, usize> = HashMap::new();

        for (target, ids) in makefile.targets() {
            for &id in ids {
                let Some(rule) = makefile.rule(id) else {
                    continue;
                };

                if rule.commands.is_empty() {
                    if let Some(&slot) = empty_by_target.get(target) {
                        snapshot.rules[slot]
                            .prereqs
                            .extend(rule.prerequisites.iter().cloned());
                        continue;
                    }
                } else if let Some(&slot) = by_rule.get(&id) {
                    snapshot.rules[slot].targets.push(target.to_owned());
                    continue;
                }

                snapshot.rules.push(RuleSnapshot {
                    targets: vec![target.to_owned()],
                    doublecolon: rule.doublecolon,
                    prereqs: rule.prerequisites.clone(),
                    targetpattern: rule.target_pattern.clone(),
                    commands: rule.commands.iter().map(|c| c.to_source()).collect(),
                });
                let slot = snapshot.rules.len() - 1;
                if rule.commands.is_empty() {
                    empty_by_target.insert(target.to_owned(), slot);
                } else {
                    by_rule.insert(id, slot);
                }
            }
        }

        snapshot
    }

    /// Re-synthesize makefile text for this snapshot. Multi-line variable
    /// values come back as `define` blocks, everything else as plain
    /// assignments and rule headers.
    pub fn to_makefile_source(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (key, value) in &self.variables {
            let name = scalar_text(key);
            let value = scalar_text(value);
            if value.contains('\n') {
                lines.push(format!("define {}\n{}\nendef", name, value));
            } else {
                lines.push(format!("{} = {}", name, value));
            }
        }

        for rule in &self.rules {
            let separator = if rule.doublecolon { "::" } else { ":" };
            let targets = rule.targets.join(" ");
            let prereqs = rule.prereqs.join(" ");
            match &rule.targetpattern {
                Some(pattern) if !pattern.is_empty() => {
                    lines.push(format!(
                        "{} {} {}: {}",
                        targets, separator, pattern, prereqs
                    ));
                }
                _ => lines.push(format!("{} {} {}", targets, separator, prereqs)),
            }
            for command in &rule.commands {
                lines.push(format!("\t{}", command));
            }
        }

        let mut source = lines.join("\n");
        source.push('\n');
        source
    }

    /// Load the snapshot back into a model by parsing its synthesized text.
    pub fn parse(&self, registry: &FunctionRegistry) -> Result<Makefile, ParseError> {
        parse_source(&self.to_makefile_source(), "snapshot", registry)
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}
