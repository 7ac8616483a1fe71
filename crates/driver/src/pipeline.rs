//! Compile, verify, map.

use std::path::{Path, PathBuf};

use solc_verify_mapper::{DiagnosticMapper, MappingReport};
use solc_verify_runner::{compile, verify, RunnerError, ToolchainConfig};

/// Outcome of a run that got as far as mapping.
#[derive(Debug)]
pub struct RunReport {
    pub input: PathBuf,
    pub intermediate: PathBuf,
    /// Combined compiler output.
    pub compiler_output: String,
    /// Verifier stdout followed by its stderr.
    pub verifier_output: String,
    pub mapping: MappingReport,
}

/// Run the whole toolchain on one Solidity file.
///
/// Tool failures and the verifier timeout come back as errors. Findings in
/// the contract do not: they are diagnostics in the returned report.
pub fn run(config: &ToolchainConfig, input: &Path) -> Result<RunReport, RunnerError> {
    tracing::info!(input = %input.display(), "compiling");
    let compiled = compile(config, input)?;

    tracing::info!(intermediate = %compiled.intermediate().display(), "verifying");
    let verified = verify(config, compiled.intermediate())?;

    let mapping = DiagnosticMapper::new().map_output(verified.diagnostics());
    tracing::info!(
        diagnostics = mapping.diagnostics.len(),
        anomalies = mapping.anomalies.len(),
        "mapped verifier output"
    );

    Ok(RunReport {
        input: input.to_path_buf(),
        intermediate: compiled.intermediate,
        compiler_output: compiled.output.combined(),
        verifier_output: verified.text,
        mapping,
    })
}
