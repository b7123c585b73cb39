//! # Mermend
//!
//! Sanitizer and validator for Mermaid-style diagram text. This crate
//! repairs common syntax defects in flowchart/graph and `erDiagram`
//! definitions - often produced by AI generation or hand editing - and
//! returns a structured verdict instead of ever panicking on malformed
//! input.
//!
//! ## Usage
//!
//! ```
//! use mermend::{SanitizeOptions, validate};
//!
//! let verdict = validate(
//!     "flowchart TD\nA[Start] --> B[End (v2)]",
//!     &SanitizeOptions::default(),
//! );
//! assert!(verdict.is_valid());
//! assert_eq!(
//!     verdict.corrected(),
//!     Some("flowchart TD\nA[Start] --> B[\"End (v2)\"]"),
//! );
//! ```
//!
//! The engine is pure and stateless: each call works on an immutable input
//! string and produces a fresh [`Verdict`]; concurrent calls are fully
//! independent.

mod attributes;
mod brackets;
mod classify;
mod edges;
mod error;
mod labels;
mod verdict;
#[cfg(test)]
mod validate_tests;

pub use error::{BracketMismatch, Delimiter, ValidateError};
pub use verdict::{Repair, RepairKind, Verdict};

pub use mermend_core::attribute::{AttributeField, KeyConstraint};
pub use mermend_core::diagram::DiagramKind;
pub use mermend_core::line::{Line, LineKind};
pub use mermend_core::options::SanitizeOptions;

use log::{debug, info, warn};

use classify::Declaration;

/// Validate a diagram definition and repair what can be repaired.
///
/// This is the main entry point. It runs the complete pipeline:
///
/// 1. **Gate** - reject empty input, unknown declarations, and diagram
///    kinds that are refused by policy
/// 2. **Balance** - reject documents with unbalanced brackets; no partial
///    repair is attempted, since later passes assume balanced input
/// 3. **Reconstruct** - split concatenated ER attribute definitions
/// 4. **Neutralize** - comment out edges with no destination
/// 5. **Quote** - wrap labels containing reserved characters
///
/// Fatal problems abort immediately with an invalid verdict; repairs
/// accumulate as warnings and never abort. The verdict's corrected text is
/// set only when rewriting actually changed the input.
///
/// # Example
///
/// ```
/// use mermend::{SanitizeOptions, validate};
///
/// let verdict = validate("graph TD\nA[(", &SanitizeOptions::default());
/// assert!(!verdict.is_valid());
/// assert!(verdict.corrected().is_none());
/// ```
pub fn validate(text: &str, options: &SanitizeOptions) -> Verdict {
    // Step 1: gate on empty input and the type declaration
    if text.trim().is_empty() {
        return Verdict::rejected(ValidateError::EmptyDiagram);
    }

    let kind = match classify::detect_declaration(text) {
        Declaration::Supported(kind) => kind,
        Declaration::Rejected(keyword) => {
            return Verdict::rejected(ValidateError::UnsupportedDiagramType {
                kind: keyword.to_string(),
            });
        }
        Declaration::Missing => return Verdict::rejected(ValidateError::UnknownDiagramType),
    };
    info!(kind:%; "validating diagram");

    // Step 2: bracket balance, a hard gate for everything that follows
    if let Err(mismatches) = brackets::check_balance(text, kind) {
        return Verdict::rejected(ValidateError::UnbalancedBrackets(mismatches));
    }

    // Steps 3-5: the repair pipeline
    let (corrected, repairs) = run_pipeline(text, kind, options);
    Verdict::repaired(text, corrected, repairs)
}

/// Apply the repair pipeline without the fatal-error gate.
///
/// For callers that already validated the document and only want the
/// corrected text. Input without a supported declaration is returned
/// unchanged with no repairs.
pub fn sanitize(text: &str, options: &SanitizeOptions) -> (String, Vec<Repair>) {
    match classify::detect_declaration(text) {
        Declaration::Supported(kind) => run_pipeline(text, kind, options),
        _ => (text.to_string(), Vec::new()),
    }
}

fn run_pipeline(
    text: &str,
    kind: DiagramKind,
    options: &SanitizeOptions,
) -> (String, Vec<Repair>) {
    let mut repairs = Vec::new();

    let mut current = if kind.is_entity_relationship() {
        attributes::reconstruct(text, options, &mut repairs)
    } else {
        text.to_string()
    };
    current = edges::remove_incomplete_edges(&current, kind, &mut repairs);
    current = labels::normalize(&current, kind, options);

    for repair in &repairs {
        warn!(line = repair.line; "{repair}");
    }
    debug!(repairs = repairs.len(), changed = (current != text); "sanitize pipeline finished");

    (current, repairs)
}

/// Reassemble pass output, preserving the original trailing newline.
pub(crate) fn rejoin(lines: Vec<String>, original: &str) -> String {
    let mut text = lines.join("\n");
    if original.ends_with('\n') {
        text.push('\n');
    }
    text
}
