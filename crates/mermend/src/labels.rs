//! Label quoting normalization.
//!
//! Node labels (`A[..]`, `B((..))`, `C{..}` and the mixed cylinder/stadium
//! forms), edge labels (`-->|..|`), and ER relationship labels
//! (`A ||--o{ B : ..`) may contain characters the downstream renderer
//! treats as syntax. This pass wraps such labels in double quotes, rewrites
//! internal double quotes to single quotes, and un-escapes doubly-escaped
//! quotes, so that repeated sanitization never accumulates escapes.
//!
//! Doubled and mixed bracket forms are matched before single forms so the
//! single-bracket handling never mis-splits them. The whole pass is a fixed
//! point: applying it twice equals applying it once.

use log::debug;

use mermend_core::diagram::DiagramKind;
use mermend_core::line::LineKind;
use mermend_core::options::SanitizeOptions;

use crate::classify::{self, is_arrow_char, take_identifier};

/// Characters that force a label into quotes in every dialect.
const RESERVED: [char; 12] = [
    '(', ')', '{', '}', '[', ']', '"', '\'', '<', '>', '|', '\\',
];

/// Bracket forms attached to node identifiers, doubled and mixed forms
/// first so they win over their single-character prefixes.
const BRACKET_FORMS: [(&str, &str); 7] = [
    ("[[", "]]"),
    ("[(", ")]"),
    ("([", "])"),
    ("((", "))"),
    ("[", "]"),
    ("(", ")"),
    ("{", "}"),
];

/// Quote every label that needs it.
///
/// Flowchart documents have their content lines scanned for node and edge
/// labels; ER documents only have relationship-line labels rewritten, with
/// a reserved set that tolerates hyphens but not slashes. Returns the input
/// unchanged (byte-identical) when nothing needed quoting.
pub(crate) fn normalize(text: &str, kind: DiagramKind, options: &SanitizeOptions) -> String {
    let flowchart_extra: &[char] = if options.quote_hyphenated_labels {
        &['-']
    } else {
        &[]
    };

    let mut out: Vec<String> = Vec::new();
    let mut changed = false;

    for line in classify::classify(text, kind) {
        let rewritten = match (line.kind(), kind) {
            (LineKind::Content, DiagramKind::Flowchart) => {
                rewrite_flowchart_line(line.text(), flowchart_extra)
            }
            (LineKind::Relationship, DiagramKind::EntityRelationship) => {
                rewrite_relationship_label(line.text())
            }
            _ => None,
        };
        match rewritten {
            Some(new_text) => {
                debug!(line = line.number(); "quoted label");
                changed = true;
                out.push(new_text);
            }
            None => out.push(line.text().to_string()),
        }
    }

    if !changed {
        return text.to_string();
    }
    crate::rejoin(out, text)
}

/// Rewrite one flowchart line; `None` when nothing changed.
fn rewrite_flowchart_line(raw: &str, extra: &[char]) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut changed = false;
    let mut rest = raw;

    while !rest.is_empty() {
        // Node identifier, possibly followed by a bracketed label.
        if let Some((ident, after)) = take_identifier(rest) {
            out.push_str(ident);
            rest = after;
            if let Some((open, close)) = match_opener(rest) {
                if let Some(inner_len) = find_closer(&rest[open.len()..], close) {
                    let inner = &rest[open.len()..open.len() + inner_len];
                    let fixed = normalize_label(inner, extra);
                    if fixed != inner {
                        changed = true;
                    }
                    out.push_str(open);
                    out.push_str(&fixed);
                    out.push_str(close);
                    rest = &rest[open.len() + inner_len + close.len()..];
                }
            }
            continue;
        }

        // Connector, possibly followed by an edge label.
        if let Some((arrow, after)) = take_connector(rest) {
            out.push_str(arrow);
            rest = after;
            if let Some(after_pipe) = rest.strip_prefix('|') {
                if let Some(inner_len) = find_closer(after_pipe, "|") {
                    let inner = &after_pipe[..inner_len];
                    let fixed = normalize_label(inner, extra);
                    if fixed != inner {
                        changed = true;
                    }
                    out.push('|');
                    out.push_str(&fixed);
                    out.push('|');
                    rest = &after_pipe[inner_len + 1..];
                }
            }
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    changed.then_some(out)
}

/// Rewrite the `: label` tail of an ER relationship line; `None` when
/// nothing changed. ER labels tolerate hyphens unquoted but not slashes.
fn rewrite_relationship_label(raw: &str) -> Option<String> {
    let (head, tail) = raw.split_once(':')?;
    let after_lead = tail.trim_start();
    let lead = &tail[..tail.len() - after_lead.len()];
    let core = after_lead.trim_end();
    if core.is_empty() {
        return None;
    }
    let trail = &after_lead[core.len()..];

    let fixed = normalize_label(core, &['/']);
    if fixed == core {
        return None;
    }
    Some(format!("{head}:{lead}{fixed}{trail}"))
}

/// Apply the quoting rules to one label.
///
/// Doubly-escaped quotes are un-escaped to plain single quotes first, so
/// repeated passes never stack escapes. An already-quoted label is
/// returned as-is; otherwise a label containing any reserved character is
/// wrapped in double quotes with internal double quotes demoted to single
/// quotes.
fn normalize_label(inner: &str, extra: &[char]) -> String {
    let unescaped = inner.replace("\\\"", "'");
    let trimmed = unescaped.trim();
    if trimmed.is_empty() || is_quoted(trimmed) {
        return unescaped;
    }
    if unescaped
        .chars()
        .any(|c| RESERVED.contains(&c) || extra.contains(&c))
    {
        format!("\"{}\"", unescaped.replace('"', "'"))
    } else {
        unescaped
    }
}

/// Wrapped in matching single or double quotes.
fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
}

fn match_opener(rest: &str) -> Option<(&'static str, &'static str)> {
    BRACKET_FORMS
        .iter()
        .copied()
        .find(|(open, _)| rest.starts_with(open))
}

/// Find `closer` in `haystack`, skipping double-quoted stretches, and
/// return the byte offset of its first match.
fn find_closer(haystack: &str, closer: &str) -> Option<usize> {
    let mut in_quote = false;
    for (idx, ch) in haystack.char_indices() {
        if !in_quote && haystack[idx..].starts_with(closer) {
            return Some(idx);
        }
        if ch == '"' {
            in_quote = !in_quote;
        }
    }
    None
}

/// Split a leading connector token (`-->`, `-.->`, `==>`, ...) off `rest`.
fn take_connector(rest: &str) -> Option<(&str, &str)> {
    let end = rest
        .char_indices()
        .find(|(_, c)| !is_arrow_char(*c))
        .map_or(rest.len(), |(pos, _)| pos);
    if end == 0 {
        return None;
    }
    let run = &rest[..end];
    if !is_connector(run) {
        return None;
    }
    Some((run, &rest[end..]))
}

fn is_connector(run: &str) -> bool {
    run.len() >= 2
        && (run.contains("--") || run.contains("==") || run.contains("-.") || run.contains(".-"))
}
