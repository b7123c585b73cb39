//! The entity-attribute model for ER blocks.
//!
//! An attribute line inside an entity block encodes one or more
//! `type name [keys] ["comment"]` tuples. This module provides the
//! reconstructed [`AttributeField`] record, the key-constraint vocabulary,
//! and the fixed set of type keywords the reconstructor recognizes.

use std::fmt;

/// Type keywords the attribute reconstructor recognizes.
///
/// Covers the numeric, text, boolean, date/time, structured, and identifier
/// types commonly written in ER attribute lines. Matching is ASCII
/// case-insensitive, and a parenthesized size suffix (`varchar(255)`) is
/// accepted on any keyword.
pub const TYPE_KEYWORDS: &[&str] = &[
    // numeric
    "int",
    "integer",
    "bigint",
    "smallint",
    "tinyint",
    "float",
    "double",
    "decimal",
    "numeric",
    "number",
    // text
    "string",
    "text",
    "varchar",
    "char",
    // boolean
    "bool",
    "boolean",
    // date/time
    "date",
    "datetime",
    "timestamp",
    "time",
    // structured
    "json",
    "jsonb",
    "blob",
    "binary",
    "enum",
    // identifier
    "uuid",
    "guid",
];

/// Returns `true` if the token is a recognized type keyword.
///
/// A trailing parenthesized size (`varchar(255)`, `decimal(10,2)`) does not
/// disqualify the token.
pub fn is_type_keyword(token: &str) -> bool {
    let base = match token.find('(') {
        Some(pos) if token.ends_with(')') => &token[..pos],
        _ => token,
    };
    TYPE_KEYWORDS.iter().any(|kw| base.eq_ignore_ascii_case(kw))
}

/// A key constraint attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyConstraint {
    /// `PK` - primary key.
    Primary,
    /// `FK` - foreign key.
    Foreign,
    /// `UK` - unique key.
    Unique,
}

impl KeyConstraint {
    /// Parse a constraint token. Matching is exact and upper-case, the way
    /// the markup writes them.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "PK" => Some(Self::Primary),
            "FK" => Some(Self::Foreign),
            "UK" => Some(Self::Unique),
            _ => None,
        }
    }

    /// The constraint keyword as written in attribute lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PK",
            Self::Foreign => "FK",
            Self::Unique => "UK",
        }
    }
}

impl fmt::Display for KeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconstructed attribute: `type name [keys] ["comment"]`.
///
/// Fields keep their source order within the entity block; key constraints
/// keep their source order within the field and are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeField {
    data_type: String,
    name: String,
    keys: Vec<KeyConstraint>,
    comment: Option<String>,
}

impl AttributeField {
    /// Create an attribute from its type and name.
    pub fn new(data_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            name: name.into(),
            keys: Vec::new(),
            comment: None,
        }
    }

    /// The attribute's declared type token.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key constraints in source order.
    pub fn keys(&self) -> &[KeyConstraint] {
        &self.keys
    }

    /// The trailing quoted comment, without its quotes.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Append a key constraint, ignoring duplicates.
    pub fn push_key(&mut self, key: KeyConstraint) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Attach a comment. A later comment replaces an earlier one.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Re-emit the attribute as a well-formed source line fragment.
    pub fn render(&self) -> String {
        let mut out = format!("{} {}", self.data_type, self.name);
        for key in &self.keys {
            out.push(' ');
            out.push_str(key.as_str());
        }
        if let Some(comment) = &self.comment {
            out.push_str(" \"");
            out.push_str(comment);
            out.push('"');
        }
        out
    }
}

impl fmt::Display for AttributeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keyword_matching() {
        assert!(is_type_keyword("string"));
        assert!(is_type_keyword("INT"));
        assert!(is_type_keyword("DateTime"));
        assert!(!is_type_keyword("customer"));
        assert!(!is_type_keyword("PK"));
    }

    #[test]
    fn test_parameterized_type_keyword() {
        assert!(is_type_keyword("varchar(255)"));
        assert!(is_type_keyword("decimal(10,2)"));
        // An unclosed parenthesis is not a type token.
        assert!(!is_type_keyword("varchar(255"));
    }

    #[test]
    fn test_key_constraint_parse() {
        assert_eq!(KeyConstraint::parse("PK"), Some(KeyConstraint::Primary));
        assert_eq!(KeyConstraint::parse("FK"), Some(KeyConstraint::Foreign));
        assert_eq!(KeyConstraint::parse("UK"), Some(KeyConstraint::Unique));
        // Lower case is not a constraint; it could be an attribute name.
        assert_eq!(KeyConstraint::parse("pk"), None);
    }

    #[test]
    fn test_render_type_and_name() {
        let attr = AttributeField::new("string", "name");
        assert_eq!(attr.render(), "string name");
    }

    #[test]
    fn test_render_with_keys_and_comment() {
        let mut attr = AttributeField::new("int", "customer_id");
        attr.push_key(KeyConstraint::Foreign);
        attr.set_comment("references CUSTOMER");
        assert_eq!(attr.render(), "int customer_id FK \"references CUSTOMER\"");
    }

    #[test]
    fn test_duplicate_keys_ignored() {
        let mut attr = AttributeField::new("int", "id");
        attr.push_key(KeyConstraint::Primary);
        attr.push_key(KeyConstraint::Primary);
        attr.push_key(KeyConstraint::Unique);
        assert_eq!(attr.keys(), &[KeyConstraint::Primary, KeyConstraint::Unique]);
        assert_eq!(attr.render(), "int id PK UK");
    }
}
