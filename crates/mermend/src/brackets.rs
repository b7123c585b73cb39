//! Whole-document bracket balance checking.
//!
//! Counts are taken across the entire document rather than per line, since
//! labels may wrap. A mismatch is a hard rejection: the position of the
//! missing bracket is ambiguous, so no repair is attempted, and every later
//! pass assumes balanced input.
//!
//! ER relationship lines are the one exception to raw counting: their
//! cardinality markers (`||--o{`, `}o--||`) use braces as arrow glyphs, not
//! as delimiters, so braces on those lines are excluded from the tally.

use log::debug;

use mermend_core::diagram::DiagramKind;
use mermend_core::line::LineKind;

use crate::classify;
use crate::error::{BracketMismatch, Delimiter};

/// Check that every tracked delimiter pair has matching open/close counts.
///
/// On failure, returns one [`BracketMismatch`] per unbalanced pair, in
/// [`Delimiter::ALL`] order, so callers can report all of them together.
pub(crate) fn check_balance(text: &str, kind: DiagramKind) -> Result<(), Vec<BracketMismatch>> {
    let mut open = [0usize; 3];
    let mut close = [0usize; 3];

    for line in classify::classify(text, kind) {
        let cardinality_braces = line.kind() == LineKind::Relationship;
        for ch in line.text().chars() {
            match ch {
                '[' => open[0] += 1,
                ']' => close[0] += 1,
                '(' => open[1] += 1,
                ')' => close[1] += 1,
                '{' if !cardinality_braces => open[2] += 1,
                '}' if !cardinality_braces => close[2] += 1,
                _ => {}
            }
        }
    }

    let mismatches: Vec<BracketMismatch> = Delimiter::ALL
        .iter()
        .enumerate()
        .filter(|(slot, _)| open[*slot] != close[*slot])
        .map(|(slot, delimiter)| BracketMismatch {
            delimiter: *delimiter,
            open_count: open[slot],
            close_count: close[slot],
        })
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        debug!(mismatches = mismatches.len(); "bracket balance check failed");
        Err(mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_flowchart(text: &str) -> Result<(), Vec<BracketMismatch>> {
        check_balance(text, DiagramKind::Flowchart)
    }

    #[test]
    fn test_balanced_document() {
        assert!(check_flowchart("graph TD\nA[Start] --> B(End)\nC{Choice}").is_ok());
    }

    #[test]
    fn test_empty_document_is_balanced() {
        assert!(check_flowchart("").is_ok());
    }

    #[test]
    fn test_single_unmatched_open() {
        let mismatches = check_flowchart("graph TD\nA[(").unwrap_err();
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].delimiter, Delimiter::Square);
        assert_eq!(mismatches[0].open_count, 1);
        assert_eq!(mismatches[0].close_count, 0);
        assert_eq!(mismatches[1].delimiter, Delimiter::Round);
    }

    #[test]
    fn test_all_mismatches_reported_together() {
        let mismatches = check_flowchart("graph TD\n[[(}").unwrap_err();
        let kinds: Vec<Delimiter> = mismatches.iter().map(|m| m.delimiter).collect();
        assert_eq!(
            kinds,
            vec![Delimiter::Square, Delimiter::Round, Delimiter::Curly]
        );
    }

    #[test]
    fn test_counts_span_lines() {
        // The label wraps across lines; counts still balance document-wide.
        assert!(check_flowchart("graph TD\nA[multi\nline]").is_ok());
    }

    #[test]
    fn test_relationship_cardinality_braces_are_ignored() {
        let text = "erDiagram\nUSER {\n  int id PK\n}\nUSER ||--o{ ORDER : places";
        assert!(check_balance(text, DiagramKind::EntityRelationship).is_ok());
    }

    #[test]
    fn test_unclosed_entity_block_is_still_caught() {
        let text = "erDiagram\nUSER {\n  int id PK";
        let mismatches = check_balance(text, DiagramKind::EntityRelationship).unwrap_err();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].delimiter, Delimiter::Curly);
    }
}
