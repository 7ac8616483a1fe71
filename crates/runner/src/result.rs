use std::path::{Path, PathBuf};

use crate::process::CapturedOutput;

/// Successful compile step.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// The `.bpl` file the compiler wrote.
    pub intermediate: PathBuf,
    pub output: CapturedOutput,
}

impl CompileOutcome {
    pub fn intermediate(&self) -> &Path {
        &self.intermediate
    }
}

/// Verify step that ran to completion and printed its banner.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub output: CapturedOutput,
    /// Stdout followed by stderr, for display.
    pub text: String,
}

impl VerifyOutcome {
    /// Exit code of the verifier. Boogie exits non-zero when it finds errors,
    /// so this is informational only.
    pub fn code(&self) -> Option<i32> {
        self.output.code()
    }

    /// The stream Boogie writes findings and its banner to, in the order it
    /// wrote them. This is what the diagnostic mapper reads.
    pub fn diagnostics(&self) -> &str {
        &self.output.stdout
    }
}
