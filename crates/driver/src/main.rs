//! solc-verify: verify a Solidity contract with the Boogie toolchain.
//!
//! Usage:
//!   solc-verify Token.sol --solc /opt/solc-verify/solc --boogie /opt/boogie/Boogie.exe
//!
//! Exit codes: 0 when verification ran to completion (findings or not),
//! 1 when the compiler or verifier failed or timed out, 2 on usage errors.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use solc_verify_driver::cli::{Cli, OutputFormat};
use solc_verify_driver::json_output::{print_json_report, JsonRunReport};
use solc_verify_driver::output::{print_error, print_report};
use solc_verify_driver::pipeline;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.toolchain_config();
    match pipeline::run(&config, &cli.file) {
        Ok(report) => {
            match cli.output_format {
                OutputFormat::Text => print_report(&report, cli.verbose),
                OutputFormat::Json => print_json_report(&JsonRunReport::from(&report)),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}
