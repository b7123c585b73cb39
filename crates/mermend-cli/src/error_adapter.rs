//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Invalid
//! verdicts carry the source text so rejection reasons can point at the
//! offending line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use mermend::ValidateError;

use crate::CliError;

/// Adapter for an invalid-verdict error with its source text.
pub struct InvalidDiagramAdapter<'a> {
    /// The rejection reason.
    err: &'a ValidateError,
    /// Source code for displaying snippets.
    src: &'a str,
}

impl<'a> InvalidDiagramAdapter<'a> {
    /// Create a new adapter over a rejection and its source.
    pub fn new(err: &'a ValidateError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the first substantive (non-blank, non-comment) line.
    fn declaration_span(&self) -> Option<SourceSpan> {
        let mut offset = 0usize;
        for raw in self.src.lines() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() && !trimmed.starts_with("%%") {
                let start = offset + (raw.len() - raw.trim_start().len());
                return Some(SourceSpan::new(start.into(), trimmed.len()));
            }
            offset += raw.len() + 1;
        }
        None
    }
}

impl fmt::Debug for InvalidDiagramAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidDiagramAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InvalidDiagramAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for InvalidDiagramAdapter<'_> {}

impl MietteDiagnostic for InvalidDiagramAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            ValidateError::EmptyDiagram => "mermend::empty",
            ValidateError::UnbalancedBrackets(_) => "mermend::unbalanced_brackets",
            ValidateError::UnsupportedDiagramType { .. } => "mermend::unsupported_type",
            ValidateError::UnknownDiagramType => "mermend::unknown_type",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            ValidateError::EmptyDiagram => "provide a flowchart, graph, or erDiagram definition",
            ValidateError::UnbalancedBrackets(_) => {
                "add the missing bracket(s); their position is ambiguous, so no repair is attempted"
            }
            ValidateError::UnsupportedDiagramType { .. } => {
                "only flowchart, graph, and erDiagram definitions are repaired"
            }
            ValidateError::UnknownDiagramType => {
                "start the document with `flowchart`, `graph`, or `erDiagram`"
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, message) = match self.err {
            ValidateError::UnsupportedDiagramType { .. } => {
                (self.declaration_span()?, "declared here")
            }
            ValidateError::UnknownDiagramType => {
                (self.declaration_span()?, "expected a declaration here")
            }
            _ => return None,
        };
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.to_string()), span),
        )))
    }
}

/// Adapter for [`CliError`] variants without source context.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "mermend::io",
            CliError::Invalid { .. } => return None,
            CliError::ConfigParse(_) => "mermend::config",
            CliError::ConfigMissing(_) => "mermend::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An invalid verdict with source location information.
    Invalid(InvalidDiagramAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Invalid(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Invalid(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Invalid(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Invalid(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Invalid(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Invalid(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// [`CliError::Invalid`] becomes a rich diagnostic over its source text;
/// other variants become plain reportables.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Invalid { err: invalid, src } => {
            vec![Reportable::Invalid(InvalidDiagramAdapter::new(
                invalid, src,
            ))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
