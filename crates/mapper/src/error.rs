use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::kind::DiagnosticKind;

/// Malformed `path(line,col):` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("missing '(' before the line/column pair")]
    MissingOpenParen,
    #[error("missing '):' after the line/column pair")]
    MissingCloseParen,
    #[error("no file path before the line/column pair")]
    EmptyPath,
    #[error("missing ',' between line and column in '{0}'")]
    MissingComma(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("line numbers start at 1, got 0")]
    ZeroLine,
}

/// Failure to resolve one verifier diagnostic.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("malformed reference: {0}")]
    Reference(#[from] ReferenceError),

    #[error("cannot read intermediate file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("line {line} is outside {} ({len} lines)", path.display())]
    LineOutOfRange {
        path: PathBuf,
        /// 1-based line number after applying the kind's offset.
        line: i64,
        len: usize,
    },

    #[error("{kind} diagnostic is the last output line; its related location is missing")]
    MissingFollowUp { kind: DiagnosticKind },
}

/// A verifier output line that could not be mapped.
///
/// Anomalies are collected next to the successfully mapped diagnostics; they
/// never abort the mapping pass.
#[derive(Debug)]
pub struct MappingAnomaly {
    /// Index of the offending line among the non-empty output lines.
    pub line_index: usize,
    /// The output line as printed by the verifier.
    pub line: String,
    pub error: MapperError,
}

impl fmt::Display for MappingAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot map '{}': {}", self.line.trim(), self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reference_errors() {
        assert_eq!(
            ReferenceError::MissingOpenParen.to_string(),
            "missing '(' before the line/column pair"
        );
        assert_eq!(
            ReferenceError::MissingComma("10".into()).to_string(),
            "missing ',' between line and column in '10'"
        );
        assert_eq!(
            MapperError::from(ReferenceError::ZeroLine).to_string(),
            "malformed reference: line numbers start at 1, got 0"
        );
    }

    #[test]
    fn display_out_of_range() {
        let err = MapperError::LineOutOfRange {
            path: PathBuf::from("a.bpl"),
            line: 12,
            len: 3,
        };
        assert_eq!(err.to_string(), "line 12 is outside a.bpl (3 lines)");
    }

    #[test]
    fn display_missing_follow_up() {
        let err = MapperError::MissingFollowUp {
            kind: DiagnosticKind::Postcondition,
        };
        assert_eq!(
            err.to_string(),
            "postcondition diagnostic is the last output line; its related location is missing"
        );
    }

    #[test]
    fn display_anomaly() {
        let anomaly = MappingAnomaly {
            line_index: 0,
            line: "  bogus This assertion might not hold.".to_string(),
            error: ReferenceError::MissingOpenParen.into(),
        };
        assert_eq!(
            anomaly.to_string(),
            "cannot map 'bogus This assertion might not hold.': malformed reference: missing '(' before the line/column pair"
        );
    }
}
