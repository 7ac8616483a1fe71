/// Structured JSON output for a verification run.
///
/// Selected with `--output-format json`. The report goes to stdout as one
/// pretty-printed document; logs and error notices stay on stderr.
use serde::{Deserialize, Serialize};

use solc_verify_mapper::{MappingAnomaly, SourceDiagnostic, VerifierSummary};

use crate::pipeline::RunReport;

/// Complete run report in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRunReport {
    pub input: String,
    pub intermediate: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    /// Verifier lines that could not be mapped back to the source.
    pub anomalies: Vec<JsonAnomaly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JsonSummary>,
    pub no_errors_found: bool,
}

/// One mapped diagnostic.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// "assertion", "postcondition", "precondition", "inconclusive", ...
    pub kind: String,
    pub source_file: Option<String>,
    pub source_line: Option<usize>,
    pub source_column: Option<usize>,
    pub message: Option<String>,
    /// The line as printed in text mode.
    pub rendered: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonAnomaly {
    pub line_index: usize,
    pub line: String,
    pub error: String,
}

/// Counts from the verifier's summary line.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub verified: u64,
    pub errors: u64,
    pub inconclusive: u64,
    pub timeouts: u64,
    pub out_of_memory: u64,
}

impl From<&SourceDiagnostic> for JsonDiagnostic {
    fn from(d: &SourceDiagnostic) -> Self {
        Self {
            kind: d.kind.as_str().to_string(),
            source_file: d.location.as_ref().map(|l| l.file.clone()),
            source_line: d.location.as_ref().map(|l| l.line),
            source_column: d.location.as_ref().map(|l| l.column),
            message: d.message.clone(),
            rendered: d.to_string(),
        }
    }
}

impl From<&MappingAnomaly> for JsonAnomaly {
    fn from(a: &MappingAnomaly) -> Self {
        Self {
            line_index: a.line_index,
            line: a.line.clone(),
            error: a.error.to_string(),
        }
    }
}

impl From<&VerifierSummary> for JsonSummary {
    fn from(s: &VerifierSummary) -> Self {
        Self {
            verified: s.verified,
            errors: s.errors,
            inconclusive: s.inconclusive,
            timeouts: s.timeouts,
            out_of_memory: s.out_of_memory,
        }
    }
}

impl From<&RunReport> for JsonRunReport {
    fn from(report: &RunReport) -> Self {
        let mapping = &report.mapping;
        Self {
            input: report.input.display().to_string(),
            intermediate: report.intermediate.display().to_string(),
            diagnostics: mapping.diagnostics.iter().map(JsonDiagnostic::from).collect(),
            anomalies: mapping.anomalies.iter().map(JsonAnomaly::from).collect(),
            summary: mapping.summary.as_ref().map(JsonSummary::from),
            no_errors_found: mapping.no_errors_found,
        }
    }
}

/// Print a JSON run report to stdout.
pub fn print_json_report(report: &JsonRunReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("cannot serialize JSON report: {e}"),
    }
}
