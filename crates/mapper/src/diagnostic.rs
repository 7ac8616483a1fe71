use std::fmt;

use crate::annotation::SourceLocation;
use crate::error::MappingAnomaly;
use crate::kind::DiagnosticKind;
use crate::summary::VerifierSummary;

/// Placeholder printed when the resolved line has no `{:sourceloc}`.
pub const NO_LOCATION: &str = "no traceable location";
/// Placeholder printed when the resolved line has no `{:message}`.
pub const NO_MESSAGE: &str = "no message";
/// Printed after the diagnostics when the summary reports zero errors.
pub const NO_ERRORS_FOUND: &str = "No errors found.";

/// A verifier failure translated back to the Solidity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDiagnostic {
    pub kind: DiagnosticKind,
    pub location: Option<SourceLocation>,
    pub message: Option<String>,
}

impl SourceDiagnostic {
    /// `"<file>, line <L>, col <C>"` or the location placeholder.
    pub fn location_text(&self) -> String {
        self.location
            .as_ref()
            .map_or_else(|| NO_LOCATION.to_string(), SourceLocation::to_string)
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(NO_MESSAGE)
    }

    /// Text after the location. Inconclusive results name the function
    /// carried in the message annotation.
    pub fn detail(&self) -> String {
        match self.kind {
            DiagnosticKind::Inconclusive => {
                format!("Inconclusive result for function '{}'", self.message_text())
            }
            _ => self.message_text().to_string(),
        }
    }
}

impl fmt::Display for SourceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location_text(), self.detail())
    }
}

/// Everything the mapper derived from one verifier run.
#[derive(Debug, Default)]
pub struct MappingReport {
    /// Mapped diagnostics in verifier output order.
    pub diagnostics: Vec<SourceDiagnostic>,
    /// Lines that looked like diagnostics but could not be resolved.
    pub anomalies: Vec<MappingAnomaly>,
    /// Summary parsed from the last output line, if it was one.
    pub summary: Option<VerifierSummary>,
    /// Set when the summary reports zero errors.
    pub no_errors_found: bool,
}

impl MappingReport {
    /// Rendered output: one line per diagnostic, then the success notice.
    pub fn rendered_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.diagnostics.iter().map(ToString::to_string).collect();
        if self.no_errors_found {
            lines.push(NO_ERRORS_FOUND.to_string());
        }
        lines
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
