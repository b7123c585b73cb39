//! Line classification.
//!
//! The classifier is the first pass over a document: it splits the input
//! into lines and assigns each a [`LineKind`] using the priority order
//! declaration > comment > blank > entity-block structure > relationship >
//! attribute > content. It has no side effects and is idempotent; every
//! pass that needs classifications recomputes them fresh.

use log::trace;

use mermend_core::diagram::{self, DiagramKind};
use mermend_core::line::{Line, LineKind};

/// Comment marker for diagram text.
pub(crate) const COMMENT_MARKER: &str = "%%";

/// Outcome of scanning the document head for a type declaration.
///
/// Leading blank and comment lines are skipped; the first substantive line
/// decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Declaration {
    /// A declaration the sanitizer repairs.
    Supported(DiagramKind),
    /// A declaration refused by policy, carrying the offending keyword.
    Rejected(&'static str),
    /// No recognized declaration before the first substantive line.
    Missing,
}

/// Scan the document head for its diagram-type declaration.
pub(crate) fn detect_declaration(text: &str) -> Declaration {
    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        if let Some(kind) = DiagramKind::from_declaration(trimmed) {
            return Declaration::Supported(kind);
        }
        if let Some(keyword) = diagram::rejected_declaration(trimmed) {
            return Declaration::Rejected(keyword);
        }
        return Declaration::Missing;
    }
    Declaration::Missing
}

/// Classify every line of the document.
///
/// `kind` is the diagram family detected from the declaration; entity-block
/// and relationship kinds are only assigned inside entity-relationship
/// documents.
pub(crate) fn classify(text: &str, kind: DiagramKind) -> Vec<Line<'_>> {
    let is_er = kind.is_entity_relationship();
    let mut in_block = false;
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        let line_kind = if diagram::is_declaration(trimmed) {
            LineKind::TypeDeclaration
        } else if trimmed.starts_with(COMMENT_MARKER) {
            LineKind::Comment
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else if is_er && !in_block && is_entity_block_start(trimmed) {
            in_block = true;
            LineKind::EntityBlockStart
        } else if is_er && in_block && trimmed == "}" {
            in_block = false;
            LineKind::EntityBlockEnd
        } else if is_er && is_relationship_line(trimmed) {
            LineKind::Relationship
        } else if is_er && in_block {
            LineKind::Attribute
        } else {
            LineKind::Content
        };

        trace!(line = index + 1, kind:% = line_kind; "classified line");
        lines.push(Line::new(raw, index, line_kind));
    }

    lines
}

/// `IDENTIFIER {` opening an entity block.
fn is_entity_block_start(content: &str) -> bool {
    let Some(head) = content.strip_suffix('{') else {
        return false;
    };
    let name = head.trim();
    !name.is_empty() && take_identifier(name).is_some_and(|(_, rest)| rest.is_empty())
}

/// `IDENTIFIER rel-symbol IDENTIFIER [: label]`.
fn is_relationship_line(content: &str) -> bool {
    let Some((_, rest)) = take_identifier(content) else {
        return false;
    };
    let rest = rest.trim_start();
    let Some((symbol, rest)) = take_arrow_run(rest) else {
        return false;
    };
    if !is_relationship_symbol(symbol) {
        return false;
    }
    let rest = rest.trim_start();
    let Some((_, rest)) = take_identifier(rest) else {
        return false;
    };
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with(':')
}

/// A relationship symbol is a run of cardinality/line characters joined by
/// an identifying (`--`) or non-identifying (`..`) line.
fn is_relationship_symbol(symbol: &str) -> bool {
    symbol.len() >= 2 && (symbol.contains("--") || symbol.contains(".."))
}

/// Split a leading identifier off `input`, returning `(identifier, rest)`.
pub(crate) fn take_identifier(input: &str) -> Option<(&str, &str)> {
    let mut chars = input.char_indices();
    let (_, first) = chars.next()?;
    if !is_ident_start(first) {
        return None;
    }
    let end = chars
        .find(|(_, c)| !is_ident_continue(*c))
        .map_or(input.len(), |(pos, _)| pos);
    Some((&input[..end], &input[end..]))
}

/// Split a leading run of relationship/arrow characters off `input`.
pub(crate) fn take_arrow_run(input: &str) -> Option<(&str, &str)> {
    let end = input
        .char_indices()
        .find(|(_, c)| !is_er_arrow_char(*c))
        .map_or(input.len(), |(pos, _)| pos);
    if end == 0 {
        return None;
    }
    Some((&input[..end], &input[end..]))
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_arrow_char(c: char) -> bool {
    matches!(c, '-' | '.' | '=' | '<' | '>' | 'o' | 'x')
}

pub(crate) fn is_er_arrow_char(c: char) -> bool {
    is_arrow_char(c) || matches!(c, '|' | '{' | '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, kind: DiagramKind) -> Vec<LineKind> {
        classify(text, kind).iter().map(Line::kind).collect()
    }

    #[test]
    fn test_detect_supported_declaration() {
        assert_eq!(
            detect_declaration("flowchart TD\nA --> B"),
            Declaration::Supported(DiagramKind::Flowchart)
        );
        assert_eq!(
            detect_declaration("erDiagram\nUSER {\n}"),
            Declaration::Supported(DiagramKind::EntityRelationship)
        );
    }

    #[test]
    fn test_detect_skips_leading_comments_and_blanks() {
        assert_eq!(
            detect_declaration("\n%% a note\n\ngraph LR\nA --> B"),
            Declaration::Supported(DiagramKind::Flowchart)
        );
    }

    #[test]
    fn test_detect_rejected_declaration() {
        assert_eq!(
            detect_declaration("sequenceDiagram\nAlice->>Bob: hi"),
            Declaration::Rejected("sequenceDiagram")
        );
    }

    #[test]
    fn test_detect_missing_declaration() {
        assert_eq!(detect_declaration("A --> B"), Declaration::Missing);
        assert_eq!(detect_declaration("%% only a comment"), Declaration::Missing);
        assert_eq!(detect_declaration(""), Declaration::Missing);
    }

    #[test]
    fn test_classify_flowchart() {
        let text = "flowchart TD\n%% note\n\nA[Start] --> B";
        assert_eq!(
            kinds(text, DiagramKind::Flowchart),
            vec![
                LineKind::TypeDeclaration,
                LineKind::Comment,
                LineKind::Blank,
                LineKind::Content,
            ]
        );
    }

    #[test]
    fn test_classify_entity_block() {
        let text = "erDiagram\nUSER {\n  string name\n}\nUSER ||--o{ ORDER : places";
        assert_eq!(
            kinds(text, DiagramKind::EntityRelationship),
            vec![
                LineKind::TypeDeclaration,
                LineKind::EntityBlockStart,
                LineKind::Attribute,
                LineKind::EntityBlockEnd,
                LineKind::Relationship,
            ]
        );
    }

    #[test]
    fn test_relationship_requires_symbol_and_target() {
        assert!(is_relationship_line("USER ||--o{ ORDER : places"));
        assert!(is_relationship_line("A }o..|| B"));
        assert!(!is_relationship_line("USER ORDER : places"));
        assert!(!is_relationship_line("USER ||--o{"));
        assert!(!is_relationship_line("string name PK"));
    }

    #[test]
    fn test_entity_block_start_shapes() {
        assert!(is_entity_block_start("USER {"));
        assert!(is_entity_block_start("ORDER_ITEM{"));
        assert!(!is_entity_block_start("{"));
        assert!(!is_entity_block_start("USER"));
        assert!(!is_entity_block_start("USER ORDER {"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let text = "erDiagram\nUSER {\n  string name\n}\n";
        let first = classify(text, DiagramKind::EntityRelationship);
        let second = classify(text, DiagramKind::EntityRelationship);
        assert_eq!(first, second);
    }

    #[test]
    fn test_er_structure_outside_flowchart_is_content() {
        let text = "flowchart TD\nUSER {\n  string name\n}";
        assert_eq!(
            kinds(text, DiagramKind::Flowchart),
            vec![
                LineKind::TypeDeclaration,
                LineKind::Content,
                LineKind::Content,
                LineKind::Content,
            ]
        );
    }
}
