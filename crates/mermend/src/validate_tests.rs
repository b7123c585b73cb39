//! Scenario tests for the full validation pipeline.
//!
//! These exercise the validator end to end: the fatal gates, each repair
//! pass through the public entry points, and the pipeline-wide guarantees
//! (idempotence, bracket preservation, no silent data loss).

use crate::{RepairKind, SanitizeOptions, ValidateError, Verdict, brackets, sanitize, validate};

fn validate_default(text: &str) -> Verdict {
    validate(text, &SanitizeOptions::default())
}

/// Assert the verdict is valid and the text needed no change.
fn assert_valid_unchanged(text: &str) {
    let verdict = validate_default(text);
    assert!(verdict.is_valid(), "expected valid verdict for {text:?}");
    assert_eq!(
        verdict.corrected(),
        None,
        "expected no correction for {text:?}"
    );
}

/// Assert the verdict is valid and was corrected to `expected`.
fn assert_corrected(text: &str, expected: &str) {
    let verdict = validate_default(text);
    assert!(verdict.is_valid(), "expected valid verdict for {text:?}");
    assert_eq!(verdict.corrected(), Some(expected));
}

mod gates {
    use super::*;

    #[test]
    fn test_empty_input_is_rejected() {
        for text in ["", "   ", "\n\t\n"] {
            let verdict = validate_default(text);
            assert_eq!(verdict.error(), Some(&ValidateError::EmptyDiagram));
            assert!(verdict.corrected().is_none());
        }
    }

    #[test]
    fn test_unsupported_declaration_names_the_kind() {
        let verdict = validate_default("stateDiagram-v2\n[*] --> Idle");
        match verdict.error() {
            Some(ValidateError::UnsupportedDiagramType { kind }) => {
                assert_eq!(kind, "stateDiagram-v2");
            }
            other => panic!("expected UnsupportedDiagramType, got {other:?}"),
        }
    }

    #[test]
    fn test_sequence_diagram_is_unsupported() {
        let verdict = validate_default("sequenceDiagram\nAlice->>Bob: hi");
        match verdict.error() {
            Some(ValidateError::UnsupportedDiagramType { kind }) => {
                assert_eq!(kind, "sequenceDiagram");
            }
            other => panic!("expected UnsupportedDiagramType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_declaration_is_a_distinct_error() {
        let verdict = validate_default("A --> B");
        assert_eq!(verdict.error(), Some(&ValidateError::UnknownDiagramType));
    }

    #[test]
    fn test_unbalanced_brackets_reject_without_repair() {
        let verdict = validate_default("graph TD\nA[(");
        let Some(ValidateError::UnbalancedBrackets(mismatches)) = verdict.error() else {
            panic!("expected UnbalancedBrackets, got {:?}", verdict.error());
        };
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].open_count, 1);
        assert_eq!(mismatches[0].close_count, 0);
        assert!(verdict.corrected().is_none());
        assert!(verdict.warnings().is_empty());
    }

    #[test]
    fn test_declaration_after_leading_comment_is_accepted() {
        assert_valid_unchanged("%% generated\nflowchart TD\nA --> B");
    }
}

mod repairs {
    use super::*;

    #[test]
    fn test_label_with_parens_is_quoted_without_warning() {
        let verdict = validate_default("flowchart TD\nA[Start] --> B[End (v2)]");
        assert!(verdict.is_valid());
        assert_eq!(
            verdict.corrected(),
            Some("flowchart TD\nA[Start] --> B[\"End (v2)\"]")
        );
        assert!(verdict.warnings().is_empty());
    }

    #[test]
    fn test_dangling_edge_is_commented_with_warning() {
        let verdict = validate_default("flowchart TD\nA --> ");
        assert!(verdict.is_valid());
        assert_eq!(
            verdict.corrected(),
            Some("flowchart TD\n%% incomplete edge removed: A -->")
        );
        assert_eq!(verdict.warnings().len(), 1);
        let warning = &verdict.warnings()[0];
        assert_eq!(warning.line, 2);
        assert_eq!(warning.kind, RepairKind::IncompleteEdgeRemoved);
    }

    #[test]
    fn test_concatenated_attributes_are_split_with_warning() {
        let verdict = validate_default("erDiagram\nUSER {\n  string name PK string email\n}");
        assert!(verdict.is_valid());
        assert_eq!(
            verdict.corrected(),
            Some("erDiagram\nUSER {\n  string name PK\n  string email\n}")
        );
        assert_eq!(verdict.warnings().len(), 1);
        let warning = &verdict.warnings()[0];
        assert_eq!(warning.line, 3);
        assert_eq!(warning.kind, RepairKind::AttributeLineSplit);
    }

    #[test]
    fn test_default_type_insertion_is_warned() {
        let verdict = validate_default("erDiagram\nUSER {\n  name\n}");
        assert!(verdict.is_valid());
        assert_eq!(
            verdict.corrected(),
            Some("erDiagram\nUSER {\n  string name\n}")
        );
        assert_eq!(verdict.warnings().len(), 1);
        assert_eq!(verdict.warnings()[0].kind, RepairKind::DefaultTypeInserted);
    }

    #[test]
    fn test_multiple_repairs_accumulate() {
        let verdict = validate_default("flowchart TD\nA[a (1)] --> B\nB --> \nC --> ");
        assert!(verdict.is_valid());
        assert_eq!(verdict.warnings().len(), 2);
        assert_eq!(verdict.warnings()[0].line, 3);
        assert_eq!(verdict.warnings()[1].line, 4);
        let corrected = verdict.corrected().expect("text should change");
        assert!(corrected.contains("A[\"a (1)\"]"));
        assert!(corrected.contains("%% incomplete edge removed: B -->"));
        assert!(corrected.contains("%% incomplete edge removed: C -->"));
    }

    #[test]
    fn test_er_relationship_label_is_quoted() {
        let verdict = validate_default("erDiagram\nUSER ||--o{ ORDER : creates/updates");
        assert_eq!(
            verdict.corrected(),
            Some("erDiagram\nUSER ||--o{ ORDER : \"creates/updates\"")
        );
    }

    #[test]
    fn test_valid_documents_pass_untouched() {
        assert_valid_unchanged("flowchart TD\nA[Start] --> B[End]");
        assert_valid_unchanged("graph LR\nA --> B\nB --> C");
        assert_valid_unchanged(
            "erDiagram\nUSER {\n  int id PK\n  string name\n}\nUSER ||--o{ ORDER : places",
        );
    }

    #[test]
    fn test_trailing_newline_is_preserved() {
        assert_corrected(
            "flowchart TD\nA[a (1)]\n",
            "flowchart TD\nA[\"a (1)\"]\n",
        );
    }
}

mod properties {
    use super::*;

    const SAMPLES: &[&str] = &[
        "flowchart TD\nA[Start] --> B[End (v2)]",
        "flowchart TD\nA --> ",
        "graph TD\nA[the \"big\" one] -->|go (now)| B",
        "erDiagram\nUSER {\n  string name PK string email\n}",
        "erDiagram\nUSER {\n  name\n}\nUSER ||--o{ ORDER : creates/updates",
        "flowchart TD\nA[Start] --> B[End]",
    ];

    #[test]
    fn test_sanitize_is_idempotent() {
        let options = SanitizeOptions::default();
        for sample in SAMPLES {
            let (once, _) = sanitize(sample, &options);
            let (twice, repairs) = sanitize(&once, &options);
            assert_eq!(once, twice, "sanitize not idempotent for {sample:?}");
            assert!(
                repairs.is_empty(),
                "second pass still repaired {sample:?}"
            );
        }
    }

    #[test]
    fn test_corrected_text_keeps_brackets_balanced() {
        for sample in SAMPLES {
            let verdict = validate_default(sample);
            assert!(verdict.is_valid());
            let text = verdict.corrected().unwrap_or(sample);
            let kind = if sample.starts_with("erDiagram") {
                crate::DiagramKind::EntityRelationship
            } else {
                crate::DiagramKind::Flowchart
            };
            assert!(
                brackets::check_balance(text, kind).is_ok(),
                "unbalanced output for {sample:?}"
            );
        }
    }

    #[test]
    fn test_attribute_split_loses_no_tokens() {
        let source = "erDiagram\nUSER {\n  string name PK string email UK\n}";
        let verdict = validate_default(source);
        let corrected = verdict.corrected().expect("line should split");
        for token in ["string", "name", "PK", "email", "UK"] {
            assert!(
                corrected.contains(token),
                "token {token} lost in {corrected:?}"
            );
        }
    }

    #[test]
    fn test_correctly_quoted_label_is_a_fixed_point() {
        assert_valid_unchanged("flowchart TD\nA[\"End (v2)\"] --> B");
    }

    #[test]
    fn test_sanitize_without_declaration_is_untouched() {
        let (out, repairs) = sanitize("A --> ", &SanitizeOptions::default());
        assert_eq!(out, "A --> ");
        assert!(repairs.is_empty());
    }
}
