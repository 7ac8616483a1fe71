//! Extraction of `{:sourceloc ...}` and `{:message ...}` attributes from `.bpl` lines.
//!
//! The compiler attaches both attributes to the Boogie statement generated for a
//! checked Solidity construct:
//!
//! ```text
//! assert {:sourceloc "Token.sol", 12, 9} {:message "Overflow in addition"} (x + y <= 255);
//! ```
//!
//! The two are searched independently so a line may carry either, both, or neither.

use std::fmt;

use crate::scan::Scanner;

const SOURCELOC_ATTR: &str = "{:sourceloc";
const MESSAGE_ATTR: &str = "{:message";

/// Location in the original Solidity source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, line {}, col {}", self.file, self.line, self.column)
    }
}

/// Both annotations found on one intermediate line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub location: Option<SourceLocation>,
    pub message: Option<String>,
}

impl Annotations {
    pub fn parse(line: &str) -> Self {
        Self {
            location: find_source_location(line),
            message: find_message(line),
        }
    }
}

/// First well-formed `{:sourceloc "<file>", <line>, <col>}` on the line.
pub fn find_source_location(line: &str) -> Option<SourceLocation> {
    line.match_indices(SOURCELOC_ATTR)
        .find_map(|(start, _)| parse_source_location(&line[start..]))
}

/// First well-formed `{:message "<text>"}` on the line.
pub fn find_message(line: &str) -> Option<String> {
    line.match_indices(MESSAGE_ATTR)
        .find_map(|(start, _)| parse_message(&line[start..]))
}

/// `{:sourceloc "<file>", <line>, <col>}`. The attribute ends at its first
/// `}`; the file name is everything up to the last `",` before it, so it may
/// contain quotes but never a brace.
fn parse_source_location(attr: &str) -> Option<SourceLocation> {
    let mut s = Scanner::new(attr);
    if !s.eat(SOURCELOC_ATTR) {
        return None;
    }
    s.skip_whitespace();
    if !s.eat("\"") {
        return None;
    }
    let body = s.until('}')?;
    let (file, coords) = body.rsplit_once("\",")?;
    let (line, column) = parse_line_and_column(coords)?;
    Some(SourceLocation::new(file, line, column))
}

fn parse_line_and_column(coords: &str) -> Option<(usize, usize)> {
    let mut s = Scanner::new(coords);
    s.skip_whitespace();
    let line = s.unsigned()?;
    s.skip_whitespace();
    if !s.eat(",") {
        return None;
    }
    s.skip_whitespace();
    let column = s.unsigned()?;
    s.skip_whitespace();
    s.rest().is_empty().then_some((line, column))
}

/// `{:message "<text>"}`. The text runs to the first `}`, which must directly
/// follow the closing quote.
fn parse_message(attr: &str) -> Option<String> {
    let mut s = Scanner::new(attr);
    if !s.eat(MESSAGE_ATTR) {
        return None;
    }
    s.skip_whitespace();
    if !s.eat("\"") {
        return None;
    }
    let body = s.until('}')?;
    body.strip_suffix('"').map(str::to_string)
}
