//! Entity-attribute reconstruction for ER documents.
//!
//! AI-generated ER blocks frequently concatenate several attribute
//! definitions onto one line (`string name PK string email`). This pass
//! walks every attribute line through a small state machine and re-emits
//! one well-formed `type name [keys] ["comment"]` definition per output
//! line. Lines that already hold a single definition are returned
//! byte-identical, and a line the machine cannot account for is left
//! untouched rather than risk dropping tokens.

use log::debug;

use mermend_core::attribute::{AttributeField, KeyConstraint, is_type_keyword};
use mermend_core::diagram::DiagramKind;
use mermend_core::line::LineKind;
use mermend_core::options::SanitizeOptions;

use crate::classify;
use crate::verdict::Repair;

/// Re-segment every attribute line of an ER document.
///
/// Returns the corrected document; the input is returned unchanged when no
/// line needed splitting. One [`Repair`] is pushed per line that was split,
/// plus one per default-type insertion.
pub(crate) fn reconstruct(
    text: &str,
    options: &SanitizeOptions,
    repairs: &mut Vec<Repair>,
) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut changed = false;

    for line in classify::classify(text, DiagramKind::EntityRelationship) {
        if line.kind() != LineKind::Attribute {
            out.push(line.text().to_string());
            continue;
        }

        let Some(split) = split_attribute_line(line.content(), options) else {
            out.push(line.text().to_string());
            continue;
        };

        if split.fields.len() == 1 && split.defaulted.is_empty() {
            // Already a single well-formed definition; reconstruction is a
            // no-op even when the spacing is unusual.
            out.push(line.text().to_string());
            continue;
        }

        changed = true;
        if split.fields.len() > 1 {
            repairs.push(Repair::attribute_split(line.number(), split.fields.len()));
        }
        for name in &split.defaulted {
            repairs.push(Repair::default_type(
                line.number(),
                name,
                &options.default_attribute_type,
            ));
        }
        debug!(line = line.number(), fields = split.fields.len(); "reconstructed attribute line");
        for field in &split.fields {
            out.push(format!("{}{}", line.indent(), field.render()));
        }
    }

    if !changed {
        return text.to_string();
    }
    crate::rejoin(out, text)
}

/// The attributes recovered from one source line.
struct SplitLine {
    fields: Vec<AttributeField>,
    /// Names that had no declared type and received the default.
    defaulted: Vec<String>,
}

/// In-progress attribute while walking tokens.
struct PendingAttribute {
    data_type: String,
    name: Option<String>,
    keys: Vec<KeyConstraint>,
    comment: Option<String>,
    defaulted: bool,
}

impl PendingAttribute {
    fn with_type(data_type: &str) -> Self {
        Self {
            data_type: data_type.to_string(),
            name: None,
            keys: Vec::new(),
            comment: None,
            defaulted: false,
        }
    }

    fn with_default_type(default_type: &str, name: &str) -> Self {
        Self {
            data_type: default_type.to_string(),
            name: Some(name.to_string()),
            keys: Vec::new(),
            comment: None,
            defaulted: true,
        }
    }

    fn close(self) -> Option<AttributeField> {
        let name = self.name?;
        let mut field = AttributeField::new(self.data_type, name);
        for key in self.keys {
            field.push_key(key);
        }
        if let Some(comment) = self.comment {
            field.set_comment(comment);
        }
        Some(field)
    }
}

/// Walk the line's tokens with an expecting-type / accumulating state
/// machine. Returns `None` when the line cannot be accounted for as
/// attribute definitions (stray constraint, lone type keyword, leading
/// quote) - such lines are left unchanged upstream.
fn split_attribute_line(content: &str, options: &SanitizeOptions) -> Option<SplitLine> {
    fn close_pending(
        pending: &mut Option<PendingAttribute>,
        fields: &mut Vec<AttributeField>,
        defaulted: &mut Vec<String>,
    ) -> bool {
        match pending.take() {
            None => true,
            Some(attr) => {
                let was_defaulted = attr.defaulted;
                match attr.close() {
                    Some(field) => {
                        if was_defaulted {
                            defaulted.push(field.name().to_string());
                        }
                        fields.push(field);
                        true
                    }
                    // A type with no name cannot be re-emitted without
                    // inventing data.
                    None => false,
                }
            }
        }
    }

    let mut fields = Vec::new();
    let mut defaulted = Vec::new();
    let mut pending: Option<PendingAttribute> = None;

    for token in tokenize_attribute(content) {
        match token {
            AttrToken::Quoted(comment) => match pending.as_mut() {
                Some(attr) => attr.comment = Some(comment.to_string()),
                None => return None,
            },
            AttrToken::Word(word) => {
                if let Some(key) = KeyConstraint::parse(word) {
                    match pending.as_mut() {
                        Some(attr) => {
                            if !attr.keys.contains(&key) {
                                attr.keys.push(key);
                            }
                        }
                        None => return None,
                    }
                } else if is_type_keyword(word) {
                    // A type keyword can serve as a column name
                    // (`date date PK`) when a name is still expected.
                    let expects_name = matches!(&pending, Some(attr) if attr.name.is_none());
                    if expects_name {
                        if let Some(attr) = pending.as_mut() {
                            attr.name = Some(word.to_string());
                        }
                    } else {
                        if !close_pending(&mut pending, &mut fields, &mut defaulted) {
                            return None;
                        }
                        pending = Some(PendingAttribute::with_type(word));
                    }
                } else {
                    let expects_name = matches!(&pending, Some(attr) if attr.name.is_none());
                    if expects_name {
                        if let Some(attr) = pending.as_mut() {
                            attr.name = Some(word.to_string());
                        }
                    } else {
                        if !close_pending(&mut pending, &mut fields, &mut defaulted) {
                            return None;
                        }
                        pending = Some(PendingAttribute::with_default_type(
                            &options.default_attribute_type,
                            word,
                        ));
                    }
                }
            }
        }
    }

    if !close_pending(&mut pending, &mut fields, &mut defaulted) {
        return None;
    }
    if fields.is_empty() {
        return None;
    }
    Some(SplitLine { fields, defaulted })
}

/// Tokens of an attribute line: bare words and quoted comments.
#[derive(Debug, PartialEq, Eq)]
enum AttrToken<'a> {
    Word(&'a str),
    Quoted(&'a str),
}

/// Whitespace tokenization that keeps quoted comments whole. An unclosed
/// quote swallows the rest of the line rather than dropping it.
fn tokenize_attribute(content: &str) -> Vec<AttrToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = content;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(after_quote) = rest.strip_prefix('"') {
            match after_quote.find('"') {
                Some(end) => {
                    tokens.push(AttrToken::Quoted(&after_quote[..end]));
                    rest = &after_quote[end + 1..];
                }
                None => {
                    tokens.push(AttrToken::Quoted(after_quote.trim_end()));
                    rest = "";
                }
            }
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '"')
                .unwrap_or(rest.len());
            tokens.push(AttrToken::Word(&rest[..end]));
            rest = &rest[end..];
        }
    }

    tokens
}
