//! Fatal error types for diagram validation.
//!
//! Fatal errors abort the repair pipeline immediately: the validator
//! returns an invalid verdict and never attempts a partial correction.
//! Non-fatal repairs are a separate class, see [`Repair`](crate::Repair).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A delimiter pair tracked by the bracket balance checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `[` / `]`
    Square,
    /// `(` / `)`
    Round,
    /// `{` / `}`
    Curly,
}

impl Delimiter {
    /// All tracked delimiter pairs, in reporting order.
    pub const ALL: [Delimiter; 3] = [Delimiter::Square, Delimiter::Round, Delimiter::Curly];

    /// The opening character of this pair.
    pub fn open(&self) -> char {
        match self {
            Delimiter::Square => '[',
            Delimiter::Round => '(',
            Delimiter::Curly => '{',
        }
    }

    /// The closing character of this pair.
    pub fn close(&self) -> char {
        match self {
            Delimiter::Square => ']',
            Delimiter::Round => ')',
            Delimiter::Curly => '}',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open(), self.close())
    }
}

/// One delimiter pair whose open and close counts differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketMismatch {
    /// Which delimiter pair is unbalanced.
    pub delimiter: Delimiter,
    /// Number of opening characters in the document.
    pub open_count: usize,
    /// Number of closing characters in the document.
    pub close_count: usize,
}

impl fmt::Display for BracketMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} opening `{}` vs {} closing `{}`",
            self.open_count,
            self.delimiter.open(),
            self.close_count,
            self.delimiter.close()
        )
    }
}

/// Fatal validation errors.
///
/// Each variant is a distinct rejection reason; none of them is ever
/// repaired. Unbalanced brackets carry every mismatched pair, not just the
/// first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The input is empty or whitespace-only.
    #[error("diagram text is empty")]
    EmptyDiagram,

    /// At least one delimiter pair has differing open/close counts.
    ///
    /// The position of the missing bracket is ambiguous, so no repair is
    /// attempted; later passes assume balanced input.
    #[error("unbalanced brackets: {}", join_mismatches(.0))]
    UnbalancedBrackets(Vec<BracketMismatch>),

    /// The document declares a diagram kind that is refused by policy.
    #[error("unsupported diagram type `{kind}`")]
    UnsupportedDiagramType {
        /// The declaration keyword as written in the document.
        kind: String,
    },

    /// The document does not start with any recognized declaration.
    #[error("no recognized diagram type declaration")]
    UnknownDiagramType,
}

fn join_mismatches(mismatches: &[BracketMismatch]) -> String {
    mismatches
        .iter()
        .map(BracketMismatch::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
