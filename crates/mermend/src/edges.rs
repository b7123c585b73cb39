//! Incomplete-edge removal.
//!
//! A line ending in a connector with no destination (`A --> `) makes the
//! downstream renderer fail outright. Such lines are rewritten as comments
//! carrying the original text, never deleted, so the author can recover
//! the intent. This is the only destructive transformation in the engine
//! and it always emits a warning.
//!
//! ER documents use a different relationship syntax and are skipped.

use log::debug;

use mermend_core::diagram::DiagramKind;
use mermend_core::line::LineKind;

use crate::classify::{self, is_arrow_char};
use crate::verdict::Repair;

/// Comment out every dangling edge of a flowchart document.
///
/// Returns the input unchanged (byte-identical) when no line dangles.
pub(crate) fn remove_incomplete_edges(
    text: &str,
    kind: DiagramKind,
    repairs: &mut Vec<Repair>,
) -> String {
    if kind.is_entity_relationship() {
        return text.to_string();
    }

    let mut out: Vec<String> = Vec::new();
    let mut changed = false;

    for line in classify::classify(text, kind) {
        if line.kind() == LineKind::Content && is_dangling_edge(line.content()) {
            changed = true;
            repairs.push(Repair::incomplete_edge(line.number(), line.content()));
            debug!(line = line.number(); "commented out incomplete edge");
            out.push(format!(
                "{}%% incomplete edge removed: {}",
                line.indent(),
                line.content()
            ));
        } else {
            out.push(line.text().to_string());
        }
    }

    if !changed {
        return text.to_string();
    }
    crate::rejoin(out, text)
}

/// A line dangles when it ends with a connector token - optionally
/// followed by an edge label - and nothing after, while still having a
/// source before the connector.
fn is_dangling_edge(content: &str) -> bool {
    let mut head = content.trim_end();

    // Strip a trailing `|label|` so `A -->|go|` is caught too.
    if let Some(before_close) = head.strip_suffix('|') {
        match before_close.rfind('|') {
            Some(open) => head = before_close[..open].trim_end(),
            None => return false,
        }
    }

    let bytes = head.as_bytes();
    let mut start = bytes.len();
    while start > 0 && is_arrow_char(bytes[start - 1] as char) {
        start -= 1;
    }
    let run = &head[start..];
    if !is_trailing_connector(run) {
        return false;
    }
    !head[..start].trim().is_empty()
}

fn is_trailing_connector(run: &str) -> bool {
    run.len() >= 2
        && (run.contains("--") || run.contains("==") || run.contains("-.") || run.contains(".-"))
}
