//! # solc-verify-mapper
//!
//! Translates Boogie verifier output back into Solidity source diagnostics.
//!
//! The Solidity compiler's Boogie backend tags generated statements with
//! `{:sourceloc "<file>", <line>, <col>}` and `{:message "<text>"}` attributes.
//! Boogie reports failures against lines of the `.bpl` file; this crate follows
//! those references into the `.bpl` file and reads the attributes back.
//!
//! ## Usage
//!
//! ```no_run
//! use solc_verify_mapper::DiagnosticMapper;
//!
//! let output = "Token.sol.bpl(112,3): Error BP5001: This assertion might not hold.\n\
//!               Boogie program verifier finished with 3 verified, 1 error\n";
//! let report = DiagnosticMapper::new().map_output(output);
//! for line in report.rendered_lines() {
//!     println!("{line}");
//! }
//! ```

pub mod annotation;
pub mod diagnostic;
pub mod error;
pub mod kind;
pub mod mapper;
pub mod reference;
mod scan;
pub mod source;
pub mod summary;

pub use annotation::{Annotations, SourceLocation};
pub use diagnostic::{MappingReport, SourceDiagnostic, NO_ERRORS_FOUND, NO_LOCATION, NO_MESSAGE};
pub use error::{MapperError, MappingAnomaly, ReferenceError};
pub use kind::DiagnosticKind;
pub use mapper::DiagnosticMapper;
pub use reference::{parse_reference, DiagnosticReference};
pub use source::{FsSource, InMemorySource, IntermediateSource};
pub use summary::{
    has_completion_banner, parse_summary, reports_no_errors, VerifierSummary, COMPLETION_BANNER,
};
