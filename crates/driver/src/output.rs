/// Colored terminal output.
///
/// Results go to stdout, one line per diagnostic:
///   Token.sol, line 11, col 9: Overflow in addition
///   No errors found.
///
/// Error notices, raw tool output, and the summary go to stderr.
use colored::Colorize;

use solc_verify_mapper::{DiagnosticKind, SourceDiagnostic, VerifierSummary, NO_ERRORS_FOUND};
use solc_verify_runner::RunnerError;

use crate::pipeline::RunReport;

/// One diagnostic line, location in bold, inconclusive results in yellow.
pub fn format_diagnostic(diagnostic: &SourceDiagnostic) -> String {
    let location = diagnostic.location_text();
    let detail = diagnostic.detail();
    match diagnostic.kind {
        DiagnosticKind::Inconclusive => format!("{}: {}", location.bold(), detail.yellow()),
        _ => format!("{}: {}", location.bold(), detail),
    }
}

/// `Summary: 3 verified, 1 error, 1 inconclusive`
pub fn format_summary(summary: &VerifierSummary) -> String {
    let mut parts = vec![format!("{} {}", summary.verified, "verified".green())];
    let errors = if summary.errors == 1 { "error" } else { "errors" };
    if summary.errors > 0 {
        parts.push(format!("{} {}", summary.errors, errors.red()));
    } else {
        parts.push(format!("0 {errors}"));
    }
    if summary.inconclusive > 0 {
        parts.push(format!("{} {}", summary.inconclusive, "inconclusive".yellow()));
    }
    if summary.timeouts > 0 {
        parts.push(format!("{} {}", summary.timeouts, "time outs".yellow()));
    }
    if summary.out_of_memory > 0 {
        parts.push(format!("{} {}", summary.out_of_memory, "out of memory".yellow()));
    }
    format!("Summary: {}", parts.join(", "))
}

/// Print mapped results. With `verbose`, raw tool output and the summary
/// are echoed to stderr first.
pub fn print_report(report: &RunReport, verbose: bool) {
    if verbose {
        print_raw("solc", &report.compiler_output);
        print_raw("boogie", &report.verifier_output);
    }

    for diagnostic in &report.mapping.diagnostics {
        println!("{}", format_diagnostic(diagnostic));
    }
    if report.mapping.no_errors_found {
        println!("{}", NO_ERRORS_FOUND.green());
    }

    if verbose {
        if let Some(summary) = &report.mapping.summary {
            eprintln!();
            eprintln!("{}", format_summary(summary));
        }
        if !report.mapping.anomalies.is_empty() {
            eprintln!(
                "{}",
                format!("{} verifier line(s) could not be mapped", report.mapping.anomalies.len())
                    .dimmed()
            );
        }
    }
}

/// A failed run: a red notice, then the offending tool's output verbatim.
/// Always ends with a newline.
pub fn format_error(err: &RunnerError) -> String {
    let mut text = format!("{} {err}\n", "error:".red().bold());
    if let Some(output) = err.output()
        && !output.is_empty()
    {
        text.push_str(output);
        if !output.ends_with('\n') {
            text.push('\n');
        }
    }
    text
}

pub fn print_error(err: &RunnerError) {
    eprint!("{}", format_error(err));
}

fn print_raw(tool: &str, output: &str) {
    eprintln!("{}", format!("--- {tool} output ---").dimmed());
    eprint!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        eprintln!();
    }
}
