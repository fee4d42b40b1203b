//! The expansion parser
//!
//!     A character-level engine that turns a logical-line buffer into an
//!     [`Expansion`] tree. Nested `$(...)` forms are handled with an explicit
//!     stack of frames, one per open reference, so deeply nested input cannot
//!     exhaust the call stack.
//!
//! Frames and stop sets
//!
//!     Each frame owns the expansion it is accumulating and the set of
//!     characters that end it: `,` and `)` inside a function call, `:` and
//!     `)` inside a variable name, and so on. The caller supplies the
//!     top-level stop set, which is how the statement grammar reuses this
//!     engine to scan up to `=` or `:` without any special casing.
//!
//! The `$(` ambiguity
//!
//!     After `$(`, a maximal run of lowercase letters followed by whitespace
//!     that names a registered function starts a function call; anything else
//!     starts a variable name. The lookahead alone decides; there is no
//!     backtracking between the two interpretations.

use crate::make::ast::error::{ParseError, ParseWarning};
use crate::make::ast::expansion::{Element, Expansion, SubstitutionRef, VariableRef};
use crate::make::ast::location::Location;
use crate::make::functions::{FunctionCallBuilder, FunctionRegistry};
use crate::make::lexing::data::Data;
use log::warn;
use std::mem;

/// Result of parsing one buffer.
#[derive(Debug)]
pub struct ParsedExpansion {
    pub expansion: Expansion,
    /// Byte offset of the stop character that halted the top-level scan, left
    /// unconsumed. `None` when the whole buffer was consumed.
    pub stop_offset: Option<usize>,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TopLevel,
    Function,
    VarName,
    SubstFrom,
    SubstTo,
}

/// One entry of the explicit parse stack.
struct Frame<'s> {
    state: State,
    expansion: Expansion,
    stop: &'s str,
    /// Opening `$` of the reference this frame is building.
    location: Option<Location>,
    function: Option<FunctionCallBuilder>,
    name: Option<Expansion>,
    pattern: Option<Expansion>,
}

impl<'s> Frame<'s> {
    fn new(state: State, stop: &'s str) -> Self {
        Frame {
            state,
            expansion: Expansion::new(),
            stop,
            location: None,
            function: None,
            name: None,
            pattern: None,
        }
    }
}

/// Replace the current frame with its parent, returning the finished frame.
fn pop<'s>(stack: &mut Vec<Frame<'s>>, top: &mut Frame<'s>) -> Frame<'s> {
    match stack.pop() {
        Some(parent) => mem::replace(top, parent),
        None => unreachable!("non-toplevel frame always has a parent"),
    }
}

/// Parse `data` into an expansion, halting at any character of `stop` seen at
/// the top level.
pub fn parse_expansion(
    data: &Data,
    registry: &FunctionRegistry,
    stop: &str,
) -> Result<ParsedExpansion, ParseError> {
    let text = data.as_str();
    let bytes = text.as_bytes();
    let limit = bytes.len();

    let mut stack: Vec<Frame> = Vec::new();
    let mut top = Frame::new(State::TopLevel, stop);
    let mut warnings = Vec::new();

    let mut i = 0;
    let mut run_start = 0;
    let mut last_char = 0;
    let mut stop_offset = None;

    'scan: while i < limit {
        let b = bytes[i];
        last_char = i;
        if b == b'$' {
            top.expansion.push_str(&text[run_start..i]);
            let location = data.location_at(i);
            if i + 1 >= limit {
                // a trailing `$` references nothing; keep it literal
                top.expansion.push_str("$");
                i = limit;
                run_start = i;
                continue;
            }
            match bytes[i + 1] {
                b'$' => {
                    top.expansion.push_str("$");
                    i += 2;
                }
                b'(' => {
                    // look forward for a function name
                    let mut j = i + 2;
                    while j < limit && bytes[j].is_ascii_lowercase() {
                        j += 1;
                    }
                    let name = &text[i + 2..j];
                    let builder = if j < limit && bytes[j].is_ascii_whitespace() {
                        registry.builder(name, location.clone())
                    } else {
                        None
                    };
                    match builder {
                        Some(builder) => {
                            let mut frame = Frame::new(State::Function, ",)");
                            frame.location = Some(location);
                            frame.function = Some(builder);
                            stack.push(mem::replace(&mut top, frame));
                            // skip whitespace before the first argument
                            i = j;
                            while i < limit && bytes[i].is_ascii_whitespace() {
                                i += 1;
                            }
                        }
                        None => {
                            let mut frame = Frame::new(State::VarName, ":)");
                            frame.location = Some(location);
                            stack.push(mem::replace(&mut top, frame));
                            i += 2;
                        }
                    }
                }
                _ => {
                    // `$X` is shorthand for `$(X)`
                    if let Some(ch) = text[i + 1..].chars().next() {
                        let name = Expansion::from_literal(&text[i + 1..i + 1 + ch.len_utf8()]);
                        top.expansion
                            .push(Element::Variable(VariableRef { location, name }));
                        i += 1 + ch.len_utf8();
                    }
                }
            }
            run_start = i;
        } else if top.stop.as_bytes().contains(&b) {
            top.expansion.push_str(&text[run_start..i]);
            match top.state {
                State::TopLevel => {
                    stop_offset = Some(i);
                    run_start = i;
                    break 'scan;
                }
                State::Function if b == b',' => {
                    let argument = mem::take(&mut top.expansion);
                    if let Some(function) = top.function.as_mut() {
                        function.push_argument(argument);
                    }
                }
                State::Function => {
                    let finished = pop(&mut stack, &mut top);
                    if let Some(mut function) = finished.function {
                        function.push_argument(finished.expansion);
                        let call = function.finish()?;
                        top.expansion.push(Element::Call(call));
                    }
                }
                State::VarName if b == b':' => {
                    top.name = Some(mem::take(&mut top.expansion));
                    top.state = State::SubstFrom;
                    top.stop = "=)";
                }
                State::VarName => {
                    let finished = pop(&mut stack, &mut top);
                    if let Some(location) = finished.location {
                        top.expansion.push(Element::Variable(VariableRef {
                            location,
                            name: finished.expansion,
                        }));
                    }
                }
                State::SubstFrom if b == b'=' => {
                    top.pattern = Some(mem::take(&mut top.expansion));
                    top.state = State::SubstTo;
                    top.stop = ")";
                }
                State::SubstFrom => {
                    // A substitution of the form $(VARNAME:.ee) is probably a
                    // mistake, but make parses it: warn and fold the pattern
                    // text back into the variable name.
                    let finished = pop(&mut stack, &mut top);
                    if let (Some(location), Some(mut name)) = (finished.location, finished.name) {
                        let warning = ParseWarning::SubstitutionWithoutEquals {
                            location: location.clone(),
                            name: name.to_source(),
                        };
                        warn!("{}", warning);
                        warnings.push(warning);
                        name.push_str(":");
                        name.concat(finished.expansion);
                        top.expansion
                            .push(Element::Variable(VariableRef { location, name }));
                    }
                }
                State::SubstTo => {
                    let finished = pop(&mut stack, &mut top);
                    if let (Some(location), Some(name), Some(pattern)) =
                        (finished.location, finished.name, finished.pattern)
                    {
                        top.expansion.push(Element::Substitution(SubstitutionRef {
                            location,
                            name,
                            pattern,
                            replacement: finished.expansion,
                        }));
                    }
                }
            }
            i += 1;
            run_start = i;
        } else {
            // plain character; multi-byte sequences pass through untouched
            i += utf8_width(b);
        }
    }

    top.expansion
        .push_str(&text[run_start..stop_offset.unwrap_or(limit)]);

    if !stack.is_empty() {
        return Err(ParseError::UnterminatedReference {
            location: data.location_at(last_char),
        });
    }

    Ok(ParsedExpansion {
        expansion: top.expansion,
        stop_offset,
        warnings,
    })
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
