//! Joining physical lines into classified logical lines

use super::continuation::{find_comment_hash, is_continuation, strip_leading_whitespace};
use super::data::Data;
use crate::make::ast::location::{Location, TAB_WIDTH};
use std::sync::Arc;

/// How a logical line is to be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A recipe line: body of the rule that was open when it appeared.
    Command,
    /// Everything else: assignments, rule headers, directives.
    Syntax,
}

/// One assembled logical line.
#[derive(Debug, Clone)]
pub struct LogicalLine {
    pub kind: LineKind,
    pub data: Data,
}

/// Joins physical lines into logical lines.
///
/// Classification needs to know whether a rule is currently open, and only
/// the stream driver knows that, so [`next_logical`](Self::next_logical)
/// takes the flag per call. Raw physical lines are also handed out through
/// [`next_physical`](Self::next_physical) for `define` bodies, which are
/// taken verbatim.
#[derive(Debug)]
pub struct LineAssembler {
    path: Arc<str>,
    lines: Vec<String>,
    next: usize,
}

impl LineAssembler {
    pub fn new(source: &str, path: &str) -> Self {
        let normalized = source.replace("\r\n", "\n");
        LineAssembler {
            path: Arc::from(path),
            lines: normalized.split_inclusive('\n').map(str::to_owned).collect(),
            next: 0,
        }
    }

    /// Source identifier carried into every location this assembler mints.
    pub fn path(&self) -> Arc<str> {
        Arc::clone(&self.path)
    }

    /// Next physical line with its terminator, plus its 1-based line number.
    fn take_line(&mut self) -> Option<(usize, String)> {
        let line = self.lines.get(self.next)?.clone();
        self.next += 1;
        Some((self.next, line))
    }

    /// Next raw physical line without its terminator. Used for verbatim
    /// blocks (`define` bodies), which bypass comment and continuation
    /// handling entirely.
    pub fn next_physical(&mut self) -> Option<(usize, String)> {
        let (lineno, mut line) = self.take_line()?;
        if line.ends_with('\n') {
            line.pop();
        }
        Some((lineno, line))
    }

    /// Assemble the next logical line, or `None` at end of input.
    ///
    /// A physical line starting with a literal tab is a command body only
    /// while a rule is open; an accidental leading tab anywhere else is plain
    /// syntax.
    pub fn next_logical(&mut self, rule_open: bool) -> Option<LogicalLine> {
        let (lineno, line) = self.take_line()?;
        if rule_open && line.starts_with('\t') {
            Some(self.assemble_command(lineno, line))
        } else {
            Some(self.assemble_syntax(lineno, line))
        }
    }

    /// Commands keep continuations verbatim: the backslash and newline are
    /// part of the command text. Only the leading tab of each physical line
    /// is stripped, and the final line terminator.
    fn assemble_command(&mut self, lineno: usize, line: String) -> LogicalLine {
        let mut data = Data::new();
        let mut lineno = lineno;
        let mut fragment = line[1..].to_owned();
        let mut column = TAB_WIDTH;
        loop {
            let location = Location::new(Arc::clone(&self.path), lineno, column);
            if !is_continuation(&fragment) {
                data.append(fragment.strip_suffix('\n').unwrap_or(&fragment), location);
                break;
            }
            data.append(&fragment, location);
            match self.take_line() {
                Some((next_lineno, next_line)) => {
                    lineno = next_lineno;
                    if let Some(rest) = next_line.strip_prefix('\t') {
                        fragment = rest.to_owned();
                        column = TAB_WIDTH;
                    } else {
                        fragment = next_line;
                        column = 0;
                    }
                }
                None => break,
            }
        }
        LogicalLine {
            kind: LineKind::Command,
            data,
        }
    }

    /// Syntax lines strip comments and leading whitespace per physical line,
    /// then condense each continuation to a single space.
    fn assemble_syntax(&mut self, lineno: usize, line: String) -> LogicalLine {
        let mut data = Data::new();
        let mut lineno = lineno;
        let mut line = line;
        loop {
            if let Some(hash) = find_comment_hash(&line) {
                line.truncate(hash);
            }
            let (stripped, column) = strip_leading_whitespace(&line);
            let location = Location::new(Arc::clone(&self.path), lineno, column);
            if !is_continuation(stripped) {
                data.append(stripped.strip_suffix('\n').unwrap_or(stripped), location);
                break;
            }
            let mut fragment = stripped[..stripped.len() - 2].trim_end().to_owned();
            fragment.push(' ');
            data.append(&fragment, location);
            match self.take_line() {
                Some((next_lineno, next_line)) => {
                    lineno = next_lineno;
                    line = next_line;
                }
                None => break,
            }
        }
        LogicalLine {
            kind: LineKind::Syntax,
            data,
        }
    }
}
