//! The compile step: Solidity source to Boogie.

use std::path::Path;
use std::process::Command;

use crate::config::ToolchainConfig;
use crate::error::RunnerError;
use crate::process::run_with_watchdog;
use crate::result::CompileOutcome;

/// Run the compiler once on `input` and locate the `.bpl` file it wrote.
///
/// The compiler runs without a deadline. A non-zero exit, or a zero exit
/// that leaves no intermediate file behind, is a [`RunnerError::CompileFailed`]
/// carrying the compiler's combined output.
pub fn compile(config: &ToolchainConfig, input: &Path) -> Result<CompileOutcome, RunnerError> {
    if !input.is_file() {
        return Err(RunnerError::NotFound(input.to_path_buf()));
    }
    let intermediate = config
        .intermediate_path(input)
        .ok_or_else(|| RunnerError::InvalidInput(input.to_path_buf()))?;

    let args = config.compiler_args(input);
    tracing::debug!(
        compiler = %config.compiler_path.display(),
        args = ?args,
        "running compiler"
    );
    let mut command = Command::new(&config.compiler_path);
    command.args(&args);
    let output = run_with_watchdog(command, None)?;

    if !output.success() {
        return Err(RunnerError::CompileFailed {
            status: output.code(),
            output: output.combined(),
        });
    }
    if !intermediate.is_file() {
        tracing::warn!(path = %intermediate.display(), "compiler succeeded but wrote no intermediate file");
        return Err(RunnerError::CompileFailed {
            status: output.code(),
            output: output.combined(),
        });
    }

    tracing::info!(
        intermediate = %intermediate.display(),
        elapsed_ms = output.duration.as_millis() as u64,
        "compiled"
    );
    Ok(CompileOutcome {
        intermediate,
        output,
    })
}
