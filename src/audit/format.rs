//! Value formatting for audit details
//!
//! Decides how a single audit value is shown, or whether it is hidden.
//! Rules are applied in order:
//!
//! 1. null, `""`, `"null"` and missing values are hidden
//! 2. relation fields (employee, device, role, unit) become badges
//! 3. opaque identifiers (long hex/dash strings) are hidden
//! 4. `is_active` and booleans become an active/inactive state
//! 5. long strings become a preview that keeps the full text
//! 6. everything else is shown as plain text

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::catalog::{scalar_text, RelationCatalog};
use super::tables::AuditVocabulary;

/// Length thresholds used by the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Hex/dash strings longer than this are treated as identifiers
    pub identifier_threshold: usize,
    /// Strings longer than this are previewed
    pub preview_threshold: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            identifier_threshold: 30,
            preview_threshold: 25,
        }
    }
}

/// A value ready to be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayValue {
    /// Plain text
    Text { text: String },
    /// Reference to another record
    Badge { text: String },
    /// Active/inactive state
    State { active: bool, label: String },
    /// Shortened text with the full value kept alongside
    Preview { preview: String, full: String },
}

impl DisplayValue {
    /// Full, untruncated text of the value
    pub fn full_text(&self) -> &str {
        match self {
            DisplayValue::Text { text } | DisplayValue::Badge { text } => text,
            DisplayValue::State { label, .. } => label,
            DisplayValue::Preview { full, .. } => full,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text { text } => write!(f, "{}", text),
            DisplayValue::Badge { text } => write!(f, "[{}]", text),
            DisplayValue::State { label, .. } => write!(f, "{}", label),
            DisplayValue::Preview { preview, .. } => write!(f, "{}...", preview),
        }
    }
}

/// Formats audit values against a vocabulary and relation catalog
#[derive(Debug, Clone, Copy)]
pub struct ValueFormatter<'a> {
    vocabulary: &'a AuditVocabulary,
    catalog: &'a RelationCatalog,
    options: FormatOptions,
}

impl<'a> ValueFormatter<'a> {
    pub fn new(
        vocabulary: &'a AuditVocabulary,
        catalog: &'a RelationCatalog,
        options: FormatOptions,
    ) -> Self {
        Self {
            vocabulary,
            catalog,
            options,
        }
    }

    /// Format `value` for field `key`; `None` means "do not display"
    pub fn format(&self, key: &str, value: Option<&Value>) -> Option<DisplayValue> {
        let value = value?;
        if is_blank(value) {
            return None;
        }

        if self.vocabulary.is_relation_field(key) {
            if let Some(id) = scalar_text(value) {
                let text = self
                    .catalog
                    .resolve(key, &id)
                    .map(str::to_string)
                    .unwrap_or(id);
                return Some(DisplayValue::Badge { text });
            }
        }

        if let Value::String(s) = value {
            if self.is_technical_identifier(s) {
                return None;
            }
        }

        if key == "is_active" || value.is_boolean() {
            let active = is_truthy(value);
            let messages = &self.vocabulary.messages;
            let label = if active {
                messages.active.clone()
            } else {
                messages.inactive.clone()
            };
            return Some(DisplayValue::State { active, label });
        }

        match value {
            Value::String(s) if s.chars().count() > self.options.preview_threshold => {
                Some(DisplayValue::Preview {
                    preview: s.chars().take(self.options.preview_threshold).collect(),
                    full: s.clone(),
                })
            }
            Value::String(s) => Some(DisplayValue::Text { text: s.clone() }),
            other => Some(DisplayValue::Text {
                text: other.to_string(),
            }),
        }
    }

    fn is_technical_identifier(&self, s: &str) -> bool {
        s.chars().count() > self.options.identifier_threshold
            && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "null",
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
