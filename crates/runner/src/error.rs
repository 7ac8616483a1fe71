use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Errors from driving the compiler and verifier processes.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Input file does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Input path has no file name to derive the `.bpl` name from.
    #[error("input path has no file name: {}", .0.display())]
    InvalidInput(PathBuf),
    /// Tool binary could not be started.
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Waiting on or reading from a child failed.
    #[error("process I/O error: {0}")]
    Io(#[from] io::Error),
    /// The compiler exited unsuccessfully or produced no `.bpl` file.
    #[error("Solidity compilation failed{}", exit_suffix(*status))]
    CompileFailed { status: Option<i32>, output: String },
    /// The verifier exited unsuccessfully without a completion banner.
    #[error("Boogie verification failed{}", exit_suffix(*status))]
    VerifierFailed { status: Option<i32>, output: String },
    /// The verifier exited cleanly but never printed its completion banner.
    #[error("Boogie verification failed: no completion banner in output")]
    MissingBanner { output: String },
    /// The watchdog killed the verifier.
    #[error("Boogie timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl RunnerError {
    /// Captured tool output attached to the error, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunnerError::CompileFailed { output, .. }
            | RunnerError::VerifierFailed { output, .. }
            | RunnerError::MissingBanner { output } => Some(output),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::Timeout(_))
    }
}

fn exit_suffix(status: Option<i32>) -> String {
    match status {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}
