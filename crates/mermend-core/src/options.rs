//! Sanitizer tuning knobs.
//!
//! Options are deserializable so callers can load them from configuration
//! files. Every knob has a default matching the sanitizer's stock behavior;
//! an empty configuration is always valid.

use serde::{Deserialize, Serialize};

/// Options controlling sanitizer behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizeOptions {
    /// Type prepended to a trailing attribute name that has no declared
    /// type, so the attribute stays renderable instead of being dropped.
    pub default_attribute_type: String,

    /// Whether `-` counts as a reserved character in flowchart labels.
    /// Hyphenated label text can be misread as a connector by downstream
    /// renderers, so this defaults to on.
    pub quote_hyphenated_labels: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            default_attribute_type: "string".to_string(),
            quote_hyphenated_labels: true,
        }
    }
}
