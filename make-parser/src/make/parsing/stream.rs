//! Stream driver
//!
//! Walks the assembled logical lines of one source unit and feeds them to
//! the grammar. This is where the single piece of cross-line state lives:
//! the currently open rule, reset on every syntax line so a stray tab after
//! an assignment never turns into a command.
//!
//! The parse is all-or-nothing: the first fatal error aborts the whole
//! source unit and no partial model is returned.

use super::expansion::parse_expansion;
use super::grammar::{parse_statement, StatementOutcome};
use crate::make::ast::error::ParseError;
use crate::make::ast::location::Location;
use crate::make::functions::FunctionRegistry;
use crate::make::lexing::assembly::{LineAssembler, LineKind};
use crate::make::lexing::data::Data;
use crate::make::model::makefile::Makefile;
use crate::make::model::rules::RuleId;
use crate::make::model::variables::{Flavor, Source};

/// Parse one source unit into a makefile model.
pub fn parse_source(
    source: &str,
    path: &str,
    registry: &FunctionRegistry,
) -> Result<Makefile, ParseError> {
    let mut assembler = LineAssembler::new(source, path);
    let mut makefile = Makefile::new();
    let mut open_rule: Option<RuleId> = None;

    while let Some(line) = assembler.next_logical(open_rule.is_some()) {
        match (line.kind, open_rule) {
            (LineKind::Command, Some(id)) => {
                let parsed = parse_expansion(&line.data, registry, "")?;
                makefile.warnings.extend(parsed.warnings);
                makefile.add_command(id, parsed.expansion);
            }
            // the assembler only emits commands while a rule is open, but a
            // command-shaped line without one is still just syntax
            (LineKind::Command, None) | (LineKind::Syntax, _) => {
                open_rule = syntax_line(&mut assembler, &line.data, &mut makefile, registry)?;
            }
        }
    }

    Ok(makefile)
}

fn syntax_line(
    assembler: &mut LineAssembler,
    data: &Data,
    makefile: &mut Makefile,
    registry: &FunctionRegistry,
) -> Result<Option<RuleId>, ParseError> {
    match parse_statement(data, makefile, registry)? {
        StatementOutcome::Done => Ok(None),
        StatementOutcome::OpenedRule(id) => Ok(Some(id)),
        StatementOutcome::BeginDefine { name, location } => {
            // define bodies are verbatim physical lines up to the bare
            // endef: no comment stripping, no continuation joining. The
            // joined body still parses as one expansion, so references
            // inside it stay references.
            let mut body: Vec<(usize, String)> = Vec::new();
            loop {
                match assembler.next_physical() {
                    Some((_, line)) if line.trim() == "endef" => break,
                    Some((lineno, line)) => body.push((lineno, line)),
                    None => {
                        return Err(ParseError::UnterminatedDefine { location, name });
                    }
                }
            }
            let mut data = Data::new();
            let last = body.len().saturating_sub(1);
            for (index, (lineno, line)) in body.iter().enumerate() {
                let fragment_location = Location::new(assembler.path(), *lineno, 0);
                if index == last {
                    data.append(line, fragment_location);
                } else {
                    data.append(&format!("{}\n", line), fragment_location);
                }
            }
            let parsed = parse_expansion(&data, registry, "")?;
            makefile.warnings.extend(parsed.warnings);
            makefile
                .variables
                .set(&name, Flavor::Recursive, Source::Makefile, parsed.expansion);
            Ok(None)
        }
    }
}
