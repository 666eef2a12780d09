//! Diff rendering for audit records
//!
//! Turns an [`AuditRecord`] into display-ready details: field/value items for
//! creations, field/old/new triples for updates, or a fixed message when no
//! field-level detail applies.
//!
//! Assignment records are summarised here rather than filtered out by the
//! fetch layer; the listing keeps every row the API returns.

use serde::Serialize;
use serde_json::Value;

use super::catalog::RelationCatalog;
use super::entry::{AuditEvent, AuditRecord};
use super::format::{DisplayValue, FormatOptions, ValueFormatter};
use super::tables::{AuditVocabulary, Messages};

/// One field shown for a newly created record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationItem {
    pub key: String,
    pub label: String,
    pub value: DisplayValue,
}

/// One changed field of an updated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub key: String,
    pub label: String,
    pub old: Option<DisplayValue>,
    pub new: Option<DisplayValue>,
}

/// What the details column shows for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum AuditDetails {
    AssignmentCreated,
    AssignmentUpdated,
    Created(Vec<CreationItem>),
    /// Creation with nothing worth showing
    RecordCreated,
    Changes(Vec<FieldChange>),
    /// Update that only touched hidden fields
    InternalUpdate,
    Deleted,
}

impl AuditDetails {
    /// One line per item, or the fixed message
    pub fn to_lines(&self, messages: &Messages) -> Vec<String> {
        match self {
            AuditDetails::AssignmentCreated => vec![messages.assignment_created.clone()],
            AuditDetails::AssignmentUpdated => vec![messages.assignment_updated.clone()],
            AuditDetails::RecordCreated => vec![messages.record_created.clone()],
            AuditDetails::InternalUpdate => vec![messages.internal_update.clone()],
            AuditDetails::Deleted => vec![messages.record_deleted.clone()],
            AuditDetails::Created(items) => items
                .iter()
                .map(|item| format!("{}: {}", item.label, item.value))
                .collect(),
            AuditDetails::Changes(changes) => changes
                .iter()
                .map(|change| {
                    let side = |v: &Option<DisplayValue>| {
                        v.as_ref()
                            .map_or_else(|| messages.empty_value.clone(), ToString::to_string)
                    };
                    format!("{}: {} → {}", change.label, side(&change.old), side(&change.new))
                })
                .collect(),
        }
    }

    /// Single-line form with previews expanded to their full text
    pub fn to_plain_text(&self, messages: &Messages) -> String {
        match self {
            AuditDetails::Created(items) => items
                .iter()
                .map(|item| format!("{}: {}", item.label, item.value.full_text()))
                .collect::<Vec<_>>()
                .join("; "),
            AuditDetails::Changes(changes) => changes
                .iter()
                .map(|change| {
                    let side = |v: &Option<DisplayValue>| {
                        v.as_ref()
                            .map_or(messages.empty_value.as_str(), DisplayValue::full_text)
                            .to_string()
                    };
                    format!("{}: {} → {}", change.label, side(&change.old), side(&change.new))
                })
                .collect::<Vec<_>>()
                .join("; "),
            fixed => fixed.to_lines(messages).join("; "),
        }
    }
}

/// A record with every column resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedAudit {
    pub id: String,
    pub actor: String,
    pub event: String,
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    pub details: AuditDetails,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Renders audit records against shared lookup tables
#[derive(Debug, Clone, Copy)]
pub struct AuditRenderer<'a> {
    vocabulary: &'a AuditVocabulary,
    formatter: ValueFormatter<'a>,
}

impl<'a> AuditRenderer<'a> {
    pub fn new(
        vocabulary: &'a AuditVocabulary,
        catalog: &'a RelationCatalog,
        options: FormatOptions,
    ) -> Self {
        Self {
            vocabulary,
            formatter: ValueFormatter::new(vocabulary, catalog, options),
        }
    }

    /// Compute the details for one record
    pub fn details(&self, record: &AuditRecord) -> AuditDetails {
        let entity = self.vocabulary.entity_display_name(&record.entity_type);

        if self.vocabulary.is_assignment(&entity) {
            return match record.event {
                AuditEvent::Created => AuditDetails::AssignmentCreated,
                _ => AuditDetails::AssignmentUpdated,
            };
        }

        match record.event {
            AuditEvent::Created => self.creation_details(&entity, record),
            AuditEvent::Deleted => AuditDetails::Deleted,
            AuditEvent::Updated | AuditEvent::Other(_) => self.update_details(record),
        }
    }

    fn creation_details(&self, entity: &str, record: &AuditRecord) -> AuditDetails {
        let allowed = self.vocabulary.allow_list(entity);

        let items: Vec<CreationItem> = record
            .changes
            .new
            .iter()
            .filter(|(key, _)| allowed.iter().any(|a| a == *key))
            .filter_map(|(key, value)| {
                self.formatter
                    .format(key, Some(value))
                    .map(|value| CreationItem {
                        key: key.clone(),
                        label: self.vocabulary.field_label(key),
                        value,
                    })
            })
            .collect();

        if items.is_empty() {
            AuditDetails::RecordCreated
        } else {
            AuditDetails::Created(items)
        }
    }

    fn update_details(&self, record: &AuditRecord) -> AuditDetails {
        let old_values = &record.changes.old;
        let mut changes = Vec::new();

        for (key, new_value) in &record.changes.new {
            if self.vocabulary.is_bookkeeping_field(key) {
                continue;
            }
            if key.ends_with("_id") && !self.vocabulary.is_relation_field(key) {
                continue;
            }

            let old_value = old_values.get(key);
            if !differs(old_value, new_value) {
                continue;
            }

            let old = self.formatter.format(key, old_value);
            let new = self.formatter.format(key, Some(new_value));
            if old.is_none() && new.is_none() {
                continue;
            }

            changes.push(FieldChange {
                key: key.clone(),
                label: self.vocabulary.field_label(key),
                old,
                new,
            });
        }

        if changes.is_empty() {
            AuditDetails::InternalUpdate
        } else {
            AuditDetails::Changes(changes)
        }
    }

    /// Resolve every column of one record
    pub fn render(&self, record: &AuditRecord) -> RenderedAudit {
        let messages = &self.vocabulary.messages;
        let event = match &record.event {
            AuditEvent::Created => messages.event_created.clone(),
            AuditEvent::Updated => messages.event_updated.clone(),
            AuditEvent::Deleted => messages.event_deleted.clone(),
            AuditEvent::Other(name) => name.clone(),
        };

        RenderedAudit {
            id: record.id.clone(),
            actor: record
                .actor
                .as_ref()
                .map_or_else(|| messages.system_actor.clone(), |a| a.name.clone()),
            event,
            entity: self.vocabulary.entity_display_name(&record.entity_type),
            entity_name: record.entity_name.clone(),
            details: self.details(record),
            created_at: record.created_at,
        }
    }

    /// Render a page of records, keeping their order
    pub fn render_all(&self, records: &[AuditRecord]) -> Vec<RenderedAudit> {
        let rendered: Vec<_> = records.iter().map(|r| self.render(r)).collect();
        tracing::debug!(count = rendered.len(), "Rendered audit records");
        rendered
    }
}

/// Structural comparison; a missing old value equals JSON null
fn differs(old: Option<&Value>, new: &Value) -> bool {
    old.unwrap_or(&Value::Null) != new
}
