//! Relation-name catalog
//!
//! Audit records store foreign keys as raw ids. The catalog maps those ids
//! back to something a person recognises (an employee's name, a device's
//! inventory code) so relation badges can show names instead of ids.

use std::collections::HashMap;

use serde_json::Value;

/// Where to fetch the names for one relation field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSource {
    /// Field key in audit values, e.g. `employee_id`
    pub field: &'static str,
    /// Listing endpoint path
    pub endpoint: &'static str,
    /// Attribute preferred as the display name
    pub label_field: &'static str,
}

/// The relation listings the dashboard resolves
pub const CATALOG_SOURCES: [CatalogSource; 4] = [
    CatalogSource {
        field: "employee_id",
        endpoint: "employees",
        label_field: "name",
    },
    CatalogSource {
        field: "role_id",
        endpoint: "roles",
        label_field: "name",
    },
    CatalogSource {
        field: "unit_id",
        endpoint: "units",
        label_field: "name",
    },
    CatalogSource {
        field: "device_id",
        endpoint: "devices",
        label_field: "inventory_code",
    },
];

/// Field key -> (id -> display name)
#[derive(Debug, Clone, Default)]
pub struct RelationCatalog {
    entries: HashMap<String, HashMap<String, String>>,
}

impl RelationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, id: impl Into<String>, name: impl Into<String>) {
        self.entries
            .entry(field.to_string())
            .or_default()
            .insert(id.into(), name.into());
    }

    /// Display name for `id` under `field`, if known
    pub fn resolve(&self, field: &str, id: &str) -> Option<&str> {
        self.entries
            .get(field)
            .and_then(|names| names.get(id))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Number of names known for one field
    pub fn len_for(&self, field: &str) -> usize {
        self.entries.get(field).map_or(0, HashMap::len)
    }

    /// Add every item of a listing response to the catalog
    ///
    /// Accepts a bare array or a paginated `{ "data": [...] }` body. The name
    /// is taken from `source.label_field`, then `inventory_code`, then `name`;
    /// items without an id or any usable name are skipped. Returns how many
    /// names were added.
    pub fn fill_from_listing(&mut self, source: &CatalogSource, body: &Value) -> usize {
        let items = match body {
            Value::Array(items) => items.as_slice(),
            Value::Object(obj) => obj
                .get("data")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        };

        let mut added = 0;
        for item in items {
            let Some(id) = item.get("id").and_then(scalar_text) else {
                continue;
            };
            let name = [source.label_field, "inventory_code", "name"]
                .iter()
                .find_map(|attr| item.get(*attr).and_then(scalar_text));

            if let Some(name) = name {
                self.insert(source.field, id, name);
                added += 1;
            }
        }
        added
    }
}

/// Non-empty string or number as text
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
