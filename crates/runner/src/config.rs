use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prover backend Boogie hands its verification conditions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProverBackend {
    /// Boogie's default, Z3.
    #[default]
    Z3,
    /// Yices2 from SRI International, used with the array theory.
    Yices2,
}

impl ProverBackend {
    /// Extra Boogie arguments selecting this backend.
    pub fn verifier_args(&self) -> Vec<String> {
        match self {
            ProverBackend::Z3 => Vec::new(),
            ProverBackend::Yices2 => vec![
                "/proverOpt:SOLVER=Yices2".to_string(),
                "/useArrayTheory".to_string(),
            ],
        }
    }
}

impl fmt::Display for ProverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProverBackend::Z3 => write!(f, "Z3"),
            ProverBackend::Yices2 => write!(f, "Yices2"),
        }
    }
}

impl std::str::FromStr for ProverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "z3" => Ok(ProverBackend::Z3),
            "yices" | "yices2" => Ok(ProverBackend::Yices2),
            _ => Err(format!("Unknown prover: {s}. Valid options: z3, yices2")),
        }
    }
}

/// Paths and switches for one compile-and-verify run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Solidity compiler with the Boogie backend.
    pub compiler_path: PathBuf,
    /// Boogie executable (`Boogie.exe` for the .NET Framework build).
    pub verifier_path: PathBuf,
    /// Program the verifier is started through, usually `mono`.
    pub launcher: Option<PathBuf>,
    /// Directory the compiler writes the `.bpl` file into.
    pub output_dir: PathBuf,
    /// Wall-clock limit for the verify step in seconds (0 = no limit).
    pub timeout_secs: u64,
    /// Ask the compiler for a bit-precise encoding.
    pub bit_precise: bool,
    pub backend: ProverBackend,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler_path: PathBuf::from("solc"),
            verifier_path: PathBuf::from("Boogie.exe"),
            launcher: Some(PathBuf::from("mono")),
            output_dir: PathBuf::from("."),
            timeout_secs: 10,
            bit_precise: false,
            backend: ProverBackend::Z3,
        }
    }
}

impl ToolchainConfig {
    pub fn with_compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiler_path = path.into();
        self
    }

    pub fn with_verifier(mut self, path: impl Into<PathBuf>) -> Self {
        self.verifier_path = path.into();
        self
    }

    /// Start the verifier through `launcher`, or directly when `None`.
    pub fn with_launcher(mut self, launcher: Option<PathBuf>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the verify-step timeout in seconds (0 disables the watchdog).
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_bit_precise(mut self, bit_precise: bool) -> Self {
        self.bit_precise = bit_precise;
        self
    }

    pub fn with_backend(mut self, backend: ProverBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Watchdog duration, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// `.bpl` file the compiler produces for `input`: `<output_dir>/<file name>.bpl`.
    pub fn intermediate_path(&self, input: &Path) -> Option<PathBuf> {
        let name = input.file_name()?;
        let mut bpl = name.to_os_string();
        bpl.push(".bpl");
        Some(self.output_dir.join(bpl))
    }

    /// Arguments for `<solc> --boogie <input> -o <dir> --overwrite [--bit-precise]`.
    pub fn compiler_args(&self, input: &Path) -> Vec<String> {
        let mut args = vec![
            "--boogie".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            self.output_dir.display().to_string(),
            "--overwrite".to_string(),
        ];
        if self.bit_precise {
            args.push("--bit-precise".to_string());
        }
        args
    }

    /// Program to spawn for the verify step and its full argument list.
    pub fn verifier_invocation(&self, intermediate: &Path) -> (PathBuf, Vec<String>) {
        let mut args = Vec::new();
        let program = match &self.launcher {
            Some(launcher) => {
                args.push(self.verifier_path.display().to_string());
                launcher.clone()
            }
            None => self.verifier_path.clone(),
        };
        args.push(intermediate.display().to_string());
        args.extend(
            ["/nologo", "/doModSetAnalysis", "/errorTrace:0"]
                .iter()
                .map(|s| s.to_string()),
        );
        args.extend(self.backend.verifier_args());
        (program, args)
    }
}
