//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use solc_verify_runner::{ProverBackend, ToolchainConfig};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per diagnostic.
    #[default]
    Text,
    /// A single JSON report.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "solc-verify")]
#[command(about = "Verify a Solidity contract with solc's Boogie backend and the Boogie verifier")]
#[command(version)]
pub struct Cli {
    /// Solidity source file to verify
    pub file: PathBuf,

    /// Ask the compiler for a bit-precise encoding
    #[arg(long)]
    pub bit_precise: bool,

    /// Path to the solc compiler with the Boogie backend
    #[arg(long, default_value = "solc")]
    pub solc: PathBuf,

    /// Path to the Boogie verifier
    #[arg(long, default_value = "Boogie.exe")]
    pub boogie: PathBuf,

    /// Program the verifier is started through; pass an empty value to run it directly
    #[arg(long, default_value = "mono")]
    pub launcher: String,

    /// Directory for the intermediate .bpl file
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Verifier timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Use Yices2 with the array theory instead of Z3
    #[arg(long)]
    pub yices: bool,

    /// Echo raw compiler and verifier output
    #[arg(long)]
    pub verbose: bool,

    /// Result format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

impl Cli {
    /// Toolchain configuration with every command-line override applied.
    pub fn toolchain_config(&self) -> ToolchainConfig {
        let launcher = (!self.launcher.is_empty()).then(|| PathBuf::from(&self.launcher));
        let backend = if self.yices {
            ProverBackend::Yices2
        } else {
            ProverBackend::Z3
        };
        ToolchainConfig::default()
            .with_compiler(&self.solc)
            .with_verifier(&self.boogie)
            .with_launcher(launcher)
            .with_output_dir(&self.output)
            .with_timeout(self.timeout)
            .with_bit_precise(self.bit_precise)
            .with_backend(backend)
    }
}
