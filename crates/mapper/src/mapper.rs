//! The mapping pass.
//!
//! Walks the verifier output once, looking at each line together with the one
//! after it. A line containing a [`DiagnosticKind`] marker is resolved through
//! the kind's lookup policy:
//!
//! 1. pick the output line (current or next) holding the reference,
//! 2. parse its `path(line,col):` token,
//! 3. read the referenced `.bpl` line, shifted by the kind's offset,
//! 4. pull `{:sourceloc}` and `{:message}` from it independently.
//!
//! A failure in any step becomes a [`MappingAnomaly`] for that line and the
//! pass continues. After the last line, a summary reporting zero errors adds
//! the "No errors found." marker.

use crate::annotation::{find_message, find_source_location};
use crate::diagnostic::{MappingReport, SourceDiagnostic};
use crate::error::{MapperError, MappingAnomaly};
use crate::kind::{DiagnosticKind, LineSource, Lookup};
use crate::reference::parse_reference;
use crate::source::{FsSource, IntermediateSource};
use crate::summary::{parse_summary, VerifierSummary};

/// Maps verifier output to Solidity source diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticMapper<S = FsSource> {
    source: S,
}

impl DiagnosticMapper<FsSource> {
    /// Mapper reading intermediate files from disk.
    pub fn new() -> Self {
        Self { source: FsSource }
    }
}

impl<S: IntermediateSource> DiagnosticMapper<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Map raw verifier output. Blank lines are dropped before pairing.
    pub fn map_output(&self, output: &str) -> MappingReport {
        let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
        self.map_lines(&lines)
    }

    /// Map an already-split sequence of non-empty output lines.
    pub fn map_lines(&self, lines: &[&str]) -> MappingReport {
        let mut report = MappingReport::default();

        for (index, current) in lines.iter().enumerate() {
            let Some(kind) = DiagnosticKind::classify(current) else {
                continue;
            };
            let next = lines.get(index + 1).copied();
            tracing::debug!(line = index, %kind, "classified verifier line");

            match self.map_diagnostic(kind, current, next) {
                Ok(diagnostic) => report.diagnostics.push(diagnostic),
                Err(error) => {
                    let anomaly = MappingAnomaly {
                        line_index: index,
                        line: current.to_string(),
                        error,
                    };
                    tracing::warn!("{anomaly}");
                    report.anomalies.push(anomaly);
                }
            }
        }

        report.summary = lines.last().and_then(|last| parse_summary(last));
        report.no_errors_found = report
            .summary
            .as_ref()
            .is_some_and(VerifierSummary::is_error_free);
        report
    }

    /// Resolve one classified line into a source diagnostic.
    fn map_diagnostic(
        &self,
        kind: DiagnosticKind,
        current: &str,
        next: Option<&str>,
    ) -> Result<SourceDiagnostic, MapperError> {
        let location_line = self.resolve(kind, kind.location_lookup(), current, next)?;
        let message_line = if kind.message_lookup() == kind.location_lookup() {
            location_line.clone()
        } else {
            self.resolve(kind, kind.message_lookup(), current, next)?
        };

        Ok(SourceDiagnostic {
            kind,
            location: find_source_location(&location_line),
            message: find_message(&message_line),
        })
    }

    /// Fetch the intermediate line a lookup points at.
    fn resolve(
        &self,
        kind: DiagnosticKind,
        lookup: Lookup,
        current: &str,
        next: Option<&str>,
    ) -> Result<String, MapperError> {
        let output_line = match lookup.source {
            LineSource::Current => current,
            LineSource::Next => next.ok_or(MapperError::MissingFollowUp { kind })?,
        };
        let reference = parse_reference(output_line)?;

        let lines = self
            .source
            .read_lines(reference.path())
            .map_err(|source| MapperError::Io {
                path: reference.path.clone(),
                source,
            })?;

        let out_of_range = || MapperError::LineOutOfRange {
            path: reference.path.clone(),
            line: reference.line as i64 + lookup.offset as i64,
            len: lines.len(),
        };
        let index = reference.line_index(lookup.offset).ok_or_else(out_of_range)?;
        lines.get(index).cloned().ok_or_else(out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::SourceLocation;
    use crate::diagnostic::NO_ERRORS_FOUND;
    use crate::error::ReferenceError;
    use crate::source::InMemorySource;

    const BPL: &str = r#"procedure f(x: int)
{
    assume {:sourceloc "a.sol", 7, 5} true;
    call g(x);
    assert {:sourceloc "a.sol", 10, 3} {:message "x > 0"} (x > 0);
    assume {:message "g: precondition 'y > 1' might not hold"} true;
    x := x + 1;
}
procedure g(y: int)
    requires {:sourceloc "a.sol", 2, 9} {:message "g: precondition 'y > 1' might not hold"} (y > 1);
    ensures {:sourceloc "a.sol", 3, 9} {:message "g: postcondition 'y >= 0' might not hold"} (y >= 0);
{
}
"#;

    fn mapper() -> DiagnosticMapper<InMemorySource> {
        DiagnosticMapper::with_source(InMemorySource::new().with_file("a.bpl", BPL))
    }

    #[test]
    fn assertion_maps_to_source() {
        let report = mapper().map_lines(&[
            "a.bpl(5,5): Error BP5001: This assertion might not hold.",
            "Boogie program verifier finished with 1 verified, 1 error",
        ]);
        assert!(report.anomalies.is_empty());
        assert_eq!(
            report.rendered_lines(),
            vec!["a.sol, line 10, col 3: x > 0".to_string()]
        );
        assert!(!report.no_errors_found);
        assert_eq!(report.summary.as_ref().map(|s| s.errors), Some(1));
    }

    #[test]
    fn postcondition_uses_related_location() {
        let report = mapper().map_lines(&[
            "a.bpl(13,1): Error BP5003: A postcondition might not hold on this return path.",
            "a.bpl(11,5): Related location: This is the postcondition that might not hold.",
            "Boogie program verifier finished with 0 verified, 1 error",
        ]);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::Postcondition);
        assert_eq!(d.location, Some(SourceLocation::new("a.sol", 3, 9)));
        assert_eq!(d.message.as_deref(), Some("g: postcondition 'y >= 0' might not hold"));
    }

    #[test]
    fn precondition_takes_location_from_line_above_and_message_from_next() {
        // Call on line 4: location sits on line 3, message on line 6 (via the next output line).
        let report = mapper().map_lines(&[
            "a.bpl(4,5): Error BP5002: A precondition for this call might not hold.",
            "a.bpl(6,5): Related location: This is the precondition that might not hold.",
        ]);
        assert!(report.anomalies.is_empty());
        let d = &report.diagnostics[0];
        assert_eq!(d.location, Some(SourceLocation::new("a.sol", 7, 5)));
        assert_eq!(d.message.as_deref(), Some("g: precondition 'y > 1' might not hold"));
    }

    #[test]
    fn inconclusive_names_function() {
        let source = InMemorySource::new().with_file(
            "c.bpl",
            "procedure {:sourceloc \"c.sol\", 4, 5} {:message \"C::transfer\"} transfer()\n",
        );
        let report = DiagnosticMapper::with_source(source)
            .map_lines(&["c.bpl(1,11): Verification inconclusive (transfer)"]);
        assert_eq!(
            report.rendered_lines(),
            vec!["c.sol, line 4, col 5: Inconclusive result for function 'C::transfer'".to_string()]
        );
    }

    #[test]
    fn missing_message_yields_placeholder() {
        let report = mapper().map_lines(&["a.bpl(3,5): Error BP5001: This assertion might not hold."]);
        assert!(report.anomalies.is_empty());
        assert_eq!(
            report.rendered_lines(),
            vec!["a.sol, line 7, col 5: no message".to_string()]
        );
    }

    #[test]
    fn missing_location_yields_placeholder() {
        let report = mapper().map_lines(&["a.bpl(6,5): Error BP5001: This assertion might not hold."]);
        assert_eq!(
            report.rendered_lines(),
            vec!["no traceable location: g: precondition 'y > 1' might not hold".to_string()]
        );
    }

    #[test]
    fn clean_run_emits_only_success_marker() {
        let report = mapper().map_output(
            "\nBoogie program verifier finished with 3 verified, 0 errors\n",
        );
        assert_eq!(report.rendered_lines(), vec![NO_ERRORS_FOUND.to_string()]);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn malformed_reference_is_contained() {
        let report = mapper().map_lines(&[
            "a.bpl5,5): Error BP5001: This assertion might not hold.",
            "a.bpl(5,5): Error BP5001: This assertion might not hold.",
        ]);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].line_index, 0);
        assert!(matches!(
            report.anomalies[0].error,
            MapperError::Reference(ReferenceError::MissingOpenParen)
        ));
        assert_eq!(
            report.rendered_lines(),
            vec!["a.sol, line 10, col 3: x > 0".to_string()]
        );
    }

    #[test]
    fn follow_up_missing_on_last_line() {
        let report = mapper().map_lines(&[
            "a.bpl(13,1): Error BP5003: A postcondition might not hold on this return path.",
        ]);
        assert!(report.diagnostics.is_empty());
        assert!(matches!(
            report.anomalies[0].error,
            MapperError::MissingFollowUp {
                kind: DiagnosticKind::Postcondition
            }
        ));
    }

    #[test]
    fn unreadable_file_and_out_of_range_lines_are_contained() {
        let report = mapper().map_lines(&[
            "missing.bpl(1,1): Error BP5001: This assertion might not hold.",
            "a.bpl(99,1): Error BP5001: This assertion might not hold.",
            "a.bpl(1,1): Error BP5002: A precondition for this call might not hold.",
            "a.bpl(6,5): Related location: This is the precondition that might not hold.",
        ]);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.anomalies.len(), 3);
        assert!(matches!(report.anomalies[0].error, MapperError::Io { .. }));
        assert!(matches!(
            report.anomalies[1].error,
            MapperError::LineOutOfRange { line: 99, .. }
        ));
        assert!(matches!(
            report.anomalies[2].error,
            MapperError::LineOutOfRange { line: 0, .. }
        ));
    }

    #[test]
    fn banner_is_read_from_last_line_only() {
        let banner = "Boogie program verifier finished with 2 verified, 0 errors";

        let last = mapper().map_lines(&["some warning from the prover", banner]);
        assert!(last.no_errors_found);

        let first = mapper().map_lines(&[banner, "some warning from the prover"]);
        assert!(!first.no_errors_found);
        assert!(first.summary.is_none());
    }

    #[test]
    fn mapping_is_idempotent() {
        let output = "a.bpl(5,5): Error BP5001: This assertion might not hold.\n\
                      a.bpl(4,5): Error BP5002: A precondition for this call might not hold.\n\
                      a.bpl(6,5): Related location: This is the precondition that might not hold.\n\
                      Boogie program verifier finished with 0 verified, 2 errors\n";
        let m = mapper();
        let first = m.map_output(output);
        let second = m.map_output(output);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.rendered_lines(), second.rendered_lines());
        assert_eq!(first.diagnostics.len(), 2);
    }
}
