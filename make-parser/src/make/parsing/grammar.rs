//! Per-line statement grammar
//!
//!     Decides what one SYNTAX logical line means: a variable assignment, the
//!     start of a `define` block, or a rule header. The decision reuses the
//!     expansion parser with a stop set of `=` and `:`, so references inside
//!     names and targets nest correctly without any special casing here.
//!
//!     Conditionals and `include` are handled by other collaborators and are
//!     not part of this grammar; a line that fits nothing reports a missing
//!     separator, like make does.

use super::expansion::parse_expansion;
use crate::make::ast::error::ParseError;
use crate::make::ast::expansion::Expansion;
use crate::make::ast::location::Location;
use crate::make::functions::FunctionRegistry;
use crate::make::lexing::data::Data;
use crate::make::model::makefile::Makefile;
use crate::make::model::rules::RuleId;
use crate::make::model::variables::{Flavor, Source};

/// What a syntax line did to the model.
#[derive(Debug)]
pub enum StatementOutcome {
    /// Assignment or empty line; no rule is open afterwards.
    Done,
    /// A rule header opened this rule; command lines may follow.
    OpenedRule(RuleId),
    /// `define NAME` started a verbatim block the driver must consume.
    BeginDefine { name: String, location: Location },
}

/// Parse one SYNTAX logical line into the model.
pub fn parse_statement(
    data: &Data,
    makefile: &mut Makefile,
    registry: &FunctionRegistry,
) -> Result<StatementOutcome, ParseError> {
    let text = data.as_str();
    if text.trim().is_empty() {
        return Ok(StatementOutcome::Done);
    }

    if let Some(rest) = strip_keyword(text, "endef") {
        if rest.trim().is_empty() {
            return Err(ParseError::StrayEndef {
                location: data.location_at(0),
            });
        }
    }
    if let Some(rest) = strip_keyword(text, "define") {
        let name = rest.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyVariableName {
                location: data.location_at(0),
            });
        }
        return Ok(StatementOutcome::BeginDefine {
            name: name.to_owned(),
            location: data.location_at(0),
        });
    }
    if strip_keyword(text, "override").is_some() {
        let tail_start = text["override".len()..]
            .find(|c: char| c != ' ' && c != '\t')
            .map(|i| "override".len() + i)
            .unwrap_or(text.len());
        let tail = data.slice_from(tail_start);
        return parse_line(&tail, makefile, registry, Source::Override, true);
    }

    parse_line(data, makefile, registry, Source::Makefile, false)
}

/// First offset at or after `from` that is not a space or tab.
fn skip_blanks(data: &Data, from: usize) -> usize {
    let bytes = data.as_str().as_bytes();
    let mut offset = from;
    while matches!(bytes.get(offset), Some(b' ') | Some(b'\t')) {
        offset += 1;
    }
    offset
}

/// `text` with `keyword` removed, when `keyword` is the line's first word.
fn strip_keyword<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace()) {
        Some(rest)
    } else {
        None
    }
}

fn parse_line(
    data: &Data,
    makefile: &mut Makefile,
    registry: &FunctionRegistry,
    source: Source,
    require_assignment: bool,
) -> Result<StatementOutcome, ParseError> {
    let parsed = parse_expansion(data, registry, "=:")?;
    makefile.warnings.extend(parsed.warnings);

    let Some(offset) = parsed.stop_offset else {
        return Err(ParseError::MissingSeparator {
            location: data.location_at(0),
        });
    };

    let bytes = data.as_str().as_bytes();
    if bytes[offset] == b'=' {
        return assignment(
            data,
            makefile,
            registry,
            source,
            &parsed.expansion,
            offset,
            None,
        );
    }
    if bytes.get(offset + 1) == Some(&b'=') {
        // `NAME := value`
        return assignment(
            data,
            makefile,
            registry,
            source,
            &parsed.expansion,
            offset + 1,
            Some(Flavor::Simple),
        );
    }
    if require_assignment {
        return Err(ParseError::MissingSeparator {
            location: data.location_at(offset),
        });
    }
    rule_header(data, makefile, registry, &parsed.expansion, offset)
}

/// Which assignment operation the name's trailing marker selects.
enum AssignOp {
    Assign(Flavor),
    Append,
    Conditional,
}

#[allow(clippy::too_many_arguments)]
fn assignment(
    data: &Data,
    makefile: &mut Makefile,
    registry: &FunctionRegistry,
    source: Source,
    lhs: &Expansion,
    equals_offset: usize,
    forced_flavor: Option<Flavor>,
) -> Result<StatementOutcome, ParseError> {
    let mut name = lhs.to_source().trim().to_owned();
    let op = match forced_flavor {
        Some(flavor) => AssignOp::Assign(flavor),
        None => {
            if let Some(stripped) = name.strip_suffix('+') {
                name = stripped.trim_end().to_owned();
                AssignOp::Append
            } else if let Some(stripped) = name.strip_suffix('?') {
                name = stripped.trim_end().to_owned();
                AssignOp::Conditional
            } else {
                AssignOp::Assign(Flavor::Recursive)
            }
        }
    };
    if name.is_empty() {
        return Err(ParseError::EmptyVariableName {
            location: data.location_at(0),
        });
    }

    // value starts after the operator, with leading blanks dropped
    let value_data = data.slice_from(skip_blanks(data, equals_offset + 1));
    let parsed = parse_expansion(&value_data, registry, "")?;
    makefile.warnings.extend(parsed.warnings);

    match op {
        AssignOp::Assign(flavor) => makefile
            .variables
            .set(&name, flavor, source, parsed.expansion),
        AssignOp::Append => makefile.variables.append(&name, source, parsed.expansion),
        AssignOp::Conditional => makefile
            .variables
            .set_conditional(&name, source, parsed.expansion),
    }
    Ok(StatementOutcome::Done)
}

fn rule_header(
    data: &Data,
    makefile: &mut Makefile,
    registry: &FunctionRegistry,
    lhs: &Expansion,
    colon_offset: usize,
) -> Result<StatementOutcome, ParseError> {
    let targets: Vec<String> = lhs
        .to_source()
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    if targets.is_empty() {
        return Err(ParseError::MissingTarget {
            location: data.location_at(colon_offset),
        });
    }

    let bytes = data.as_str().as_bytes();
    let mut rest_start = colon_offset + 1;
    let doublecolon = bytes.get(rest_start) == Some(&b':');
    if doublecolon {
        rest_start += 1;
    }

    // a second top-level colon marks a static target pattern, a semicolon
    // an inline first command
    let rest = data.slice_from(rest_start);
    let parsed = parse_expansion(&rest, registry, ":;")?;
    makefile.warnings.extend(parsed.warnings);

    let mut target_pattern = None;
    let (prereq_expansion, command_tail) = match parsed.stop_offset {
        None => (parsed.expansion, None),
        Some(offset) if rest.as_str().as_bytes()[offset] == b':' => {
            let pattern = parsed.expansion.to_source().trim().to_owned();
            if !pattern.is_empty() {
                target_pattern = Some(pattern);
            }
            let after = rest.slice_from(offset + 1);
            let prereqs = parse_expansion(&after, registry, ";")?;
            makefile.warnings.extend(prereqs.warnings);
            let tail = prereqs
                .stop_offset
                .map(|o| after.slice_from(skip_blanks(&after, o + 1)));
            (prereqs.expansion, tail)
        }
        Some(offset) => (
            parsed.expansion,
            Some(rest.slice_from(skip_blanks(&rest, offset + 1))),
        ),
    };

    let prerequisites: Vec<String> = prereq_expansion
        .to_source()
        .split_whitespace()
        .map(str::to_owned)
        .collect();

    let id = makefile.begin_rule(targets, prerequisites, target_pattern, doublecolon);

    if let Some(tail) = command_tail {
        let parsed = parse_expansion(&tail, registry, "")?;
        makefile.warnings.extend(parsed.warnings);
        if !parsed.expansion.is_empty() {
            makefile.add_command(id, parsed.expansion);
        }
    }

    Ok(StatementOutcome::OpenedRule(id))
}
