//! Diagram-kind vocabulary.
//!
//! The sanitizer repairs exactly two diagram families: node/edge graphs
//! declared with `flowchart` or `graph`, and entity-relationship documents
//! declared with `erDiagram`. A further set of declarations is recognized
//! but refused by policy, and anything else is treated as unknown.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The diagram family a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramKind {
    /// A node/edge graph declared with `flowchart` or `graph`.
    Flowchart,
    /// An entity-relationship diagram declared with `erDiagram`.
    EntityRelationship,
}

impl DiagramKind {
    /// Detect the diagram kind from a declaration line.
    ///
    /// Matches the first word of the trimmed line, ignoring ASCII case, so
    /// `flowchart TD`, `graph LR` and `erDiagram` all resolve. Returns
    /// `None` for anything that is not a supported declaration.
    pub fn from_declaration(line: &str) -> Option<Self> {
        match first_word(line).to_ascii_lowercase().as_str() {
            "flowchart" | "graph" => Some(Self::Flowchart),
            "erdiagram" => Some(Self::EntityRelationship),
            _ => None,
        }
    }

    /// Returns `true` for the entity-relationship family.
    pub fn is_entity_relationship(&self) -> bool {
        matches!(self, Self::EntityRelationship)
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flowchart => write!(f, "flowchart"),
            Self::EntityRelationship => write!(f, "erDiagram"),
        }
    }
}

/// Diagram declarations that are recognized but refused by policy.
///
/// Repair heuristics for these kinds fail too often on real-world input to
/// be worth attempting, so the validator refuses them outright instead of
/// emitting a broken "correction". Longer keywords sort before their
/// prefixes (`stateDiagram-v2` before `stateDiagram`) so matching can walk
/// the list front to back.
pub const REJECTED_DECLARATIONS: &[&str] = &[
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram-v2",
    "stateDiagram",
    "gantt",
    "pie",
    "journey",
    "gitGraph",
    "mindmap",
    "timeline",
];

/// Returns the policy-refused declaration keyword a line starts with, if any.
pub fn rejected_declaration(line: &str) -> Option<&'static str> {
    let word = first_word(line);
    REJECTED_DECLARATIONS
        .iter()
        .find(|kw| word.eq_ignore_ascii_case(kw))
        .copied()
}

/// Returns `true` if the line starts with any recognized declaration,
/// supported or refused.
pub fn is_declaration(line: &str) -> bool {
    DiagramKind::from_declaration(line).is_some() || rejected_declaration(line).is_some()
}

fn first_word(line: &str) -> &str {
    line.trim_start()
        .split_whitespace()
        .next()
        .unwrap_or_default()
}
