//! Detection and parsing of Boogie's closing summary line.
//!
//! ```text
//! Boogie program verifier finished with 4 verified, 1 error, 1 inconclusive
//! ```

/// Substring that proves the verifier ran to completion.
pub const COMPLETION_BANNER: &str = "Boogie program verifier finished with";

const FINISHED_WITH: &str = "program verifier finished with";

/// Counts reported on the summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierSummary {
    /// Banner prefix before `program verifier`, e.g. `Boogie`.
    pub tool: String,
    pub verified: u64,
    pub errors: u64,
    pub inconclusive: u64,
    pub timeouts: u64,
    pub out_of_memory: u64,
}

impl VerifierSummary {
    /// `true` when the verifier reported no errors.
    pub fn is_error_free(&self) -> bool {
        self.errors == 0
    }
}

/// Whether the complete verifier output contains the completion banner.
pub fn has_completion_banner(output: &str) -> bool {
    output.contains(COMPLETION_BANNER)
}

/// Parse a `<tool> program verifier finished with N verified, M errors[, ...]` line.
///
/// The `verified` and `errors` counts are mandatory and must come first, in
/// that order. Unrecognised trailing counters are ignored.
pub fn parse_summary(line: &str) -> Option<VerifierSummary> {
    let line = line.trim();
    let at = line.find(FINISHED_WITH)?;
    let tool = line[..at].trim();
    if tool.is_empty() || tool.contains(char::is_whitespace) {
        return None;
    }

    let mut counts = line[at + FINISHED_WITH.len()..]
        .split(',')
        .map(parse_count);

    let mut summary = VerifierSummary {
        tool: tool.to_string(),
        ..VerifierSummary::default()
    };
    match counts.next()? {
        Some((n, "verified")) => summary.verified = n,
        _ => return None,
    }
    match counts.next()? {
        Some((n, "error" | "errors")) => summary.errors = n,
        _ => return None,
    }
    for count in counts {
        match count {
            Some((n, "inconclusive")) => summary.inconclusive = n,
            Some((n, "time out" | "time outs")) => summary.timeouts = n,
            Some((n, "out of memory")) => summary.out_of_memory = n,
            _ => {}
        }
    }
    Some(summary)
}

/// Split `" 12 verified"` into `(12, "verified")`.
fn parse_count(part: &str) -> Option<(u64, &str)> {
    let (number, label) = part.trim().split_once(' ')?;
    let number = number.parse().ok()?;
    Some((number, label.trim()))
}

/// Whether `line` is a summary reporting zero errors.
pub fn reports_no_errors(line: &str) -> bool {
    parse_summary(line).is_some_and(|summary| summary.is_error_free())
}
