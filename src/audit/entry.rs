//! Audit record data structures
//!
//! [`AuditLogRow`] mirrors one row of the `/audits` listing exactly as the API
//! sends it. Every field is optional on the wire and parsed leniently, then
//! converted into the typed [`AuditRecord`] the renderer works on.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::scalar_text;

/// Kind of mutation recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEvent {
    Created,
    Updated,
    Deleted,
    /// Any event name the API adds later
    Other(String),
}

impl AuditEvent {
    pub fn parse(event: &str) -> Self {
        match event {
            "created" => AuditEvent::Created,
            "updated" => AuditEvent::Updated,
            "deleted" => AuditEvent::Deleted,
            other => AuditEvent::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuditEvent::Created => "created",
            AuditEvent::Updated => "updated",
            AuditEvent::Deleted => "deleted",
            AuditEvent::Other(name) => name,
        }
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Person who made the change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub name: String,
    /// Role name, when the API embeds it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Values before and after the change, in wire key order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Changes {
    pub old: Map<String, Value>,
    pub new: Map<String, Value>,
}

/// One audit record in typed form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub id: String,
    pub event: AuditEvent,
    /// Raw model type, e.g. `App\Models\Device`
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// `None` for changes made by the system
    pub actor: Option<Actor>,
    pub changes: Changes,
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the `/audits` listing as sent by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub event: Value,
    #[serde(default)]
    pub auditable_type: Value,
    #[serde(default)]
    pub auditable_name: Value,
    #[serde(default)]
    pub old_values: Value,
    #[serde(default)]
    pub new_values: Value,
    #[serde(default)]
    pub created_at: Value,
}

impl From<AuditLogRow> for AuditRecord {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: scalar_text(&row.id).unwrap_or_default(),
            event: AuditEvent::parse(row.event.as_str().unwrap_or_default()),
            entity_type: row.auditable_type.as_str().unwrap_or_default().to_string(),
            entity_name: row
                .auditable_name
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            actor: parse_actor(&row.user),
            changes: Changes {
                old: into_map(row.old_values),
                new: into_map(row.new_values),
            },
            created_at: row.created_at.as_str().and_then(parse_timestamp),
        }
    }
}

impl AuditRecord {
    /// Build a record from one JSON row; `None` if the row is not an object
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value::<AuditLogRow>(value)
            .ok()
            .map(AuditRecord::from)
    }
}

/// Anything other than an object is treated as "no values"
fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn parse_actor(user: &Value) -> Option<Actor> {
    let name = user.get("name").and_then(Value::as_str)?;
    if name.is_empty() {
        return None;
    }
    let role = user
        .get("role")
        .and_then(|role| role.get("name").or(Some(role)))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Actor {
        name: name.to_string(),
        role,
    })
}

/// Parse RFC 3339 or the `YYYY-MM-DD HH:MM:SS` form Laravel emits
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_event_parse() {
        assert_eq!(AuditEvent::parse("created"), AuditEvent::Created);
        assert_eq!(AuditEvent::parse("deleted"), AuditEvent::Deleted);
        assert_eq!(
            AuditEvent::parse("restored"),
            AuditEvent::Other("restored".into())
        );
        assert_eq!(AuditEvent::Other("restored".into()).to_string(), "restored");
    }

    #[test]
    fn test_full_row() {
        let record = AuditRecord::from_value(json!({
            "id": 42,
            "user": {"name": "Marta", "role": {"name": "Developer"}},
            "event": "updated",
            "auditable_type": "App\\Models\\Device",
            "auditable_name": "INV-001",
            "old_values": {"status": "disponible"},
            "new_values": {"status": "asignado", "employee_id": "e1"},
            "created_at": "2025-03-14T09:30:00.000000Z"
        }))
        .unwrap();

        assert_eq!(record.id, "42");
        assert_eq!(record.event, AuditEvent::Updated);
        assert_eq!(record.entity_name.as_deref(), Some("INV-001"));
        let actor = record.actor.unwrap();
        assert_eq!(actor.name, "Marta");
        assert_eq!(actor.role.as_deref(), Some("Developer"));
        let keys: Vec<_> = record.changes.new.keys().cloned().collect();
        assert_eq!(keys, ["status", "employee_id"]);
        let at = record.created_at.unwrap();
        assert_eq!((at.year(), at.month(), at.day(), at.hour()), (2025, 3, 14, 9));
    }

    #[test]
    fn test_malformed_values_become_empty() {
        let record = AuditRecord::from_value(json!({
            "event": "updated",
            "auditable_type": "App\\Models\\User",
            "old_values": [],
            "new_values": "broken",
            "user": null
        }))
        .unwrap();

        assert!(record.changes.old.is_empty());
        assert!(record.changes.new.is_empty());
        assert!(record.actor.is_none());
        assert!(record.created_at.is_none());
        assert_eq!(record.id, "");
    }

    #[test]
    fn test_role_as_plain_string() {
        let record = AuditRecord::from_value(json!({
            "user": {"name": "Luis", "role": "admin"}
        }))
        .unwrap();
        assert_eq!(record.actor.unwrap().role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_non_object_row_rejected() {
        assert!(AuditRecord::from_value(json!("row")).is_none());
        assert!(AuditRecord::from_value(json!(null)).is_none());
    }

    #[test]
    fn test_parse_laravel_timestamp() {
        let at = parse_timestamp("2025-01-02 15:04:05").unwrap();
        assert_eq!((at.hour(), at.minute(), at.second()), (15, 4, 5));
        assert!(parse_timestamp("yesterday").is_none());
    }
}
