//! The validation verdict and repair warnings.
//!
//! A [`Verdict`] is produced once per [`validate`](crate::validate) call and
//! never mutated afterwards. Non-fatal repairs accumulate as [`Repair`]
//! entries in emission order; fatal errors short-circuit into an invalid
//! verdict with no corrected text.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::ValidateError;

/// The kind of repair a warning describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    /// A line ending in a connector with no destination was commented out.
    IncompleteEdgeRemoved,
    /// An attribute line holding several definitions was split up.
    AttributeLineSplit,
    /// A default type was prepended to an attribute that declared none.
    DefaultTypeInserted,
}

/// One non-fatal repair applied to the document.
///
/// Repairs never abort the pipeline; the engine produces the most complete
/// corrected text it can and reports everything it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repair {
    /// One-based line number of the affected source line.
    pub line: usize,
    /// What was repaired.
    pub kind: RepairKind,
    /// Human-readable description of the repair.
    pub message: String,
}

impl Repair {
    /// A dangling edge on `line` was commented out.
    pub fn incomplete_edge(line: usize, text: &str) -> Self {
        Self {
            line,
            kind: RepairKind::IncompleteEdgeRemoved,
            message: format!("commented out incomplete edge `{text}`"),
        }
    }

    /// An attribute line on `line` was split into `count` definitions.
    pub fn attribute_split(line: usize, count: usize) -> Self {
        Self {
            line,
            kind: RepairKind::AttributeLineSplit,
            message: format!("split attribute line into {count} attribute definitions"),
        }
    }

    /// Attribute `name` on `line` had no type; `data_type` was prepended.
    pub fn default_type(line: usize, name: &str, data_type: &str) -> Self {
        Self {
            line,
            kind: RepairKind::DefaultTypeInserted,
            message: format!("inserted default type `{data_type}` for attribute `{name}`"),
        }
    }
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// The outcome of validating one document.
///
/// `corrected` is set only when rewriting actually changed the text, so
/// callers can distinguish "no change needed" from "changed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    error: Option<ValidateError>,
    warnings: Vec<Repair>,
    corrected: Option<String>,
}

impl Verdict {
    /// An invalid verdict carrying the fatal error. No corrected text is
    /// ever attached to a rejection.
    pub fn rejected(error: ValidateError) -> Self {
        Self {
            error: Some(error),
            warnings: Vec::new(),
            corrected: None,
        }
    }

    /// A valid verdict. `corrected` is kept only if it differs from
    /// `original`.
    pub fn repaired(original: &str, corrected: String, warnings: Vec<Repair>) -> Self {
        let corrected = (corrected != original).then_some(corrected);
        Self {
            error: None,
            warnings,
            corrected,
        }
    }

    /// `true` when no fatal error was found.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The fatal error, present only on invalid verdicts.
    pub fn error(&self) -> Option<&ValidateError> {
        self.error.as_ref()
    }

    /// Repairs applied, in emission order. Possibly empty.
    pub fn warnings(&self) -> &[Repair] {
        &self.warnings
    }

    /// The corrected text, present only when rewriting changed the input.
    pub fn corrected(&self) -> Option<&str> {
        self.corrected.as_deref()
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut len = 2;
        if self.error.is_some() {
            len += 1;
        }
        if self.corrected.is_some() {
            len += 1;
        }
        let mut state = serializer.serialize_struct("Verdict", len)?;
        state.serialize_field("valid", &self.is_valid())?;
        if let Some(error) = &self.error {
            state.serialize_field("error", &error.to_string())?;
        }
        state.serialize_field("warnings", &self.warnings)?;
        if let Some(corrected) = &self.corrected {
            state.serialize_field("correctedText", corrected)?;
        }
        state.end()
    }
}
