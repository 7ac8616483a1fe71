//! The verifier failure categories the mapper understands.
//!
//! Each kind is recognised by a fixed marker inside the verifier line and
//! carries a lookup policy: which output line holds the reference for the
//! source location and which holds the reference for the message, plus the
//! line offset to apply inside the intermediate file.

use std::fmt;

/// Verifier output line a reference is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    /// The line that carried the marker.
    Current,
    /// The line right after it (Boogie's "Related location" line).
    Next,
}

/// Where to look for one annotation of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub source: LineSource,
    /// Shift applied to the referenced intermediate line.
    pub offset: isize,
}

impl Lookup {
    const fn new(source: LineSource, offset: isize) -> Self {
        Self { source, offset }
    }
}

/// A verifier-reported proof obligation failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Assertion,
    Postcondition,
    Precondition,
    Inconclusive,
    LoopInvariantEntry,
    LoopInvariantMaintenance,
}

impl DiagnosticKind {
    /// All kinds, in classification order.
    pub const ALL: [DiagnosticKind; 6] = [
        DiagnosticKind::Assertion,
        DiagnosticKind::Postcondition,
        DiagnosticKind::Precondition,
        DiagnosticKind::Inconclusive,
        DiagnosticKind::LoopInvariantEntry,
        DiagnosticKind::LoopInvariantMaintenance,
    ];

    /// Substring Boogie prints for this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            DiagnosticKind::Assertion => "This assertion might not hold.",
            DiagnosticKind::Postcondition => "A postcondition might not hold on this return path.",
            DiagnosticKind::Precondition => "A precondition for this call might not hold.",
            DiagnosticKind::Inconclusive => "Verification inconclusive",
            DiagnosticKind::LoopInvariantEntry => "This loop invariant might not hold on entry.",
            DiagnosticKind::LoopInvariantMaintenance => {
                "This loop invariant might not be maintained by the loop."
            }
        }
    }

    /// Classify a verifier output line by marker.
    pub fn classify(line: &str) -> Option<DiagnosticKind> {
        Self::ALL.into_iter().find(|kind| line.contains(kind.marker()))
    }

    /// Lookup for the `{:sourceloc}` annotation.
    ///
    /// A failing call's precondition is reported on the call, whose location
    /// attribute sits on the `assume` emitted one line above it.
    pub fn location_lookup(&self) -> Lookup {
        match self {
            DiagnosticKind::Postcondition => Lookup::new(LineSource::Next, 0),
            DiagnosticKind::Precondition => Lookup::new(LineSource::Current, -1),
            _ => Lookup::new(LineSource::Current, 0),
        }
    }

    /// Lookup for the `{:message}` annotation.
    pub fn message_lookup(&self) -> Lookup {
        match self {
            DiagnosticKind::Postcondition | DiagnosticKind::Precondition => {
                Lookup::new(LineSource::Next, 0)
            }
            _ => Lookup::new(LineSource::Current, 0),
        }
    }

    /// Whether resolving this kind needs the following output line.
    pub fn needs_next_line(&self) -> bool {
        self.location_lookup().source == LineSource::Next
            || self.message_lookup().source == LineSource::Next
    }

    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Assertion => "assertion",
            DiagnosticKind::Postcondition => "postcondition",
            DiagnosticKind::Precondition => "precondition",
            DiagnosticKind::Inconclusive => "inconclusive",
            DiagnosticKind::LoopInvariantEntry => "loop-invariant-entry",
            DiagnosticKind::LoopInvariantMaintenance => "loop-invariant-maintenance",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
