//! solc-verify-driver library exports.
//!
//! The `solc-verify` binary is a thin `main` over these modules; they are
//! exported so the pipeline and renderers can be tested directly.

pub mod cli;
pub mod json_output;
pub mod output;
pub mod pipeline;
