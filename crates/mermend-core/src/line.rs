//! Classified source lines.
//!
//! The sanitizer works line by line: every pass sees the document as an
//! ordered sequence of [`Line`] records, each carrying its original text,
//! zero-based index, and inferred [`LineKind`]. Classification is recomputed
//! fresh on every pass and never cached across calls.

use std::fmt;

/// Classification assigned to a single source line.
///
/// Kinds are assigned in priority order: a declaration wins over everything,
/// then comments and blanks, then entity-relationship block structure, then
/// relationship and attribute lines, and finally generic content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A diagram-type declaration such as `flowchart TD` or `erDiagram`.
    TypeDeclaration,
    /// A `%%` comment line.
    Comment,
    /// An empty or whitespace-only line.
    Blank,
    /// `IDENTIFIER {` opening an entity block (ER documents only).
    EntityBlockStart,
    /// A bare `}` closing an entity block (ER documents only).
    EntityBlockEnd,
    /// A line inside an open entity block holding attribute definitions.
    Attribute,
    /// `IDENTIFIER rel-symbol IDENTIFIER [: label]` (ER documents only).
    Relationship,
    /// Any other line: node definitions, edges, directives.
    Content,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::TypeDeclaration => "type declaration",
            LineKind::Comment => "comment",
            LineKind::Blank => "blank",
            LineKind::EntityBlockStart => "entity block start",
            LineKind::EntityBlockEnd => "entity block end",
            LineKind::Attribute => "attribute",
            LineKind::Relationship => "relationship",
            LineKind::Content => "content",
        };
        f.write_str(name)
    }
}

/// One classified line of diagram text.
///
/// Borrows from the input document; a `Line` never outlives the sanitize
/// call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    text: &'a str,
    index: usize,
    kind: LineKind,
}

impl<'a> Line<'a> {
    /// Create a classified line from its raw text and zero-based index.
    pub fn new(text: &'a str, index: usize, kind: LineKind) -> Self {
        Self { text, index, kind }
    }

    /// The raw line text, untrimmed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Zero-based index of the line in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based line number, as shown in diagnostics.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The classification assigned to this line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Leading whitespace of the raw text.
    pub fn indent(&self) -> &'a str {
        let trimmed = self.text.trim_start();
        &self.text[..self.text.len() - trimmed.len()]
    }

    /// The line text with surrounding whitespace removed.
    pub fn content(&self) -> &'a str {
        self.text.trim()
    }
}
