//! Parser for the `path(line,col):` token that opens a Boogie diagnostic line.
//!
//! Boogie reports every verification failure against a position in the `.bpl`
//! file it was given:
//!
//! ```text
//! Token.sol.bpl(112,3): Error BP5001: This assertion might not hold.
//! ```
//!
//! The path may itself contain `(` or `:` (Windows drive letters), so the token
//! is anchored on the first `"):"` and the opening parenthesis is the last one
//! before it.

use std::path::{Path, PathBuf};

use crate::error::ReferenceError;
use crate::scan::Scanner;

/// A position inside an intermediate (`.bpl`) file, as reported by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticReference {
    /// Intermediate file the verifier was pointing at.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number. Kept for completeness; lookups only use the line.
    pub column: usize,
}

impl DiagnosticReference {
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 0-based index of the referenced line shifted by `offset`.
    ///
    /// Returns `None` when the shift would move before the first line.
    pub fn line_index(&self, offset: isize) -> Option<usize> {
        self.line.checked_sub(1)?.checked_add_signed(offset)
    }
}

/// Parse the reference token at the start of a verifier output line.
pub fn parse_reference(line: &str) -> Result<DiagnosticReference, ReferenceError> {
    let line = line.trim_start();
    let close = match line.find("):") {
        Some(close) => close,
        None if line.contains('(') => return Err(ReferenceError::MissingCloseParen),
        None => return Err(ReferenceError::MissingOpenParen),
    };
    let head = &line[..close];
    let open = head.rfind('(').ok_or(ReferenceError::MissingOpenParen)?;

    let path = head[..open].trim();
    if path.is_empty() {
        return Err(ReferenceError::EmptyPath);
    }

    let coords = &head[open + 1..];
    let (line_no, column) = parse_coordinates(coords)?;
    if line_no == 0 {
        return Err(ReferenceError::ZeroLine);
    }

    Ok(DiagnosticReference::new(path, line_no, column))
}

/// Parse `line,col` with optional whitespace around either number.
fn parse_coordinates(coords: &str) -> Result<(usize, usize), ReferenceError> {
    let mut scanner = Scanner::new(coords);
    scanner.skip_whitespace();
    let line = scanner
        .unsigned()
        .ok_or_else(|| invalid_number(scanner.rest()))?;
    scanner.skip_whitespace();
    if !scanner.eat(",") {
        return Err(ReferenceError::MissingComma(coords.to_string()));
    }
    scanner.skip_whitespace();
    let column = scanner
        .unsigned()
        .ok_or_else(|| invalid_number(scanner.rest()))?;
    scanner.skip_whitespace();
    if !scanner.rest().is_empty() {
        return Err(invalid_number(scanner.rest()));
    }
    Ok((line, column))
}

fn invalid_number(found: &str) -> ReferenceError {
    let token = found.split(',').next().unwrap_or(found).trim();
    ReferenceError::InvalidNumber(token.to_string())
}
