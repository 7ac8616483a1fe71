//! The verify step: Boogie under the watchdog.

use std::path::Path;
use std::process::Command;

use solc_verify_mapper::has_completion_banner;

use crate::config::ToolchainConfig;
use crate::error::RunnerError;
use crate::process::run_with_watchdog;
use crate::result::VerifyOutcome;

/// Run the verifier on `intermediate` under the configured deadline.
///
/// Boogie reports findings and its completion banner on stdout. Output whose
/// stdout carries the banner is accepted whatever the exit code. Without the
/// banner, a non-zero exit is [`RunnerError::VerifierFailed`] and a zero exit
/// is [`RunnerError::MissingBanner`]; both carry stdout and stderr together.
pub fn verify(config: &ToolchainConfig, intermediate: &Path) -> Result<VerifyOutcome, RunnerError> {
    let (program, args) = config.verifier_invocation(intermediate);
    tracing::debug!(
        program = %program.display(),
        args = ?args,
        backend = %config.backend,
        "running verifier"
    );
    let mut command = Command::new(&program);
    command.args(&args);
    let output = run_with_watchdog(command, config.timeout())?;
    let text = output.combined();

    if !has_completion_banner(&output.stdout) {
        return Err(if output.success() {
            RunnerError::MissingBanner { output: text }
        } else {
            RunnerError::VerifierFailed {
                status: output.code(),
                output: text,
            }
        });
    }

    tracing::info!(
        status = ?output.code(),
        elapsed_ms = output.duration.as_millis() as u64,
        "verified"
    );
    Ok(VerifyOutcome { output, text })
}
