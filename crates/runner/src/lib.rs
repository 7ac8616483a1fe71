//! # solc-verify-runner
//!
//! Drives the two external tools of the solc-verify toolchain: the Solidity
//! compiler with its Boogie backend, and the Boogie verifier.
//!
//! Both run as child processes. The verifier runs under a watchdog that kills
//! its whole process tree when the configured deadline passes.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use solc_verify_runner::{compile, verify, ToolchainConfig};
//!
//! let config = ToolchainConfig::default().with_output_dir("out");
//! let compiled = compile(&config, Path::new("Token.sol")).unwrap();
//! let verified = verify(&config, compiled.intermediate()).unwrap();
//! println!("{}", verified.text);
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod process;
pub mod result;
pub mod verifier;

pub use compiler::compile;
pub use config::{ProverBackend, ToolchainConfig};
pub use error::RunnerError;
pub use process::{kill_process_tree, run_with_watchdog, CapturedOutput};
pub use result::{CompileOutcome, VerifyOutcome};
pub use verifier::verify;
