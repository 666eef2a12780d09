//! Lookup tables used to turn raw audit records into readable text
//!
//! All tables live in one [`AuditVocabulary`] value that is built once and
//! shared by reference with every render. The built-in vocabulary is the
//! Spanish one used by the inventory dashboard; a `vocabulary.json` next to
//! the settings file replaces any top-level table it names.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AssetDeskPaths;
use crate::error::{AssetDeskError, AssetDeskResult};

/// Version of the built-in vocabulary
pub const VOCABULARY_VERSION: u32 = 2;

/// Allow-list key used when an entity has no list of its own
pub const DEFAULT_ALLOW_LIST: &str = "default";

/// Fixed texts shown instead of, or around, field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub assignment_created: String,
    pub assignment_updated: String,
    pub record_created: String,
    pub internal_update: String,
    pub record_deleted: String,
    pub empty_value: String,
    pub active: String,
    pub inactive: String,
    pub system_actor: String,
    pub event_created: String,
    pub event_updated: String,
    pub event_deleted: String,
    pub no_records: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            assignment_created: "Nueva asignación realizada".into(),
            assignment_updated: "Asignación actualizada".into(),
            record_created: "Registro creado".into(),
            internal_update: "Actualización interna".into(),
            record_deleted: "Registro eliminado".into(),
            empty_value: "vacío".into(),
            active: "ACTIVO".into(),
            inactive: "INACTIVO".into(),
            system_actor: "Sistema".into(),
            event_created: "Creación".into(),
            event_updated: "Edición".into(),
            event_deleted: "Eliminación".into(),
            no_records: "Sin registros.".into(),
        }
    }
}

/// Field labels, entity names and per-entity allow-lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditVocabulary {
    /// Bumped whenever the built-in tables change
    pub version: u32,

    /// Field key -> label
    pub field_labels: HashMap<String, String>,

    /// Short model name -> display name
    pub entity_labels: HashMap<String, String>,

    /// Entity display name -> fields shown on creation
    pub allow_lists: HashMap<String, Vec<String>>,

    /// Foreign keys that point at something a person recognises
    pub relation_fields: Vec<String>,

    /// Keys never shown in update diffs
    pub bookkeeping_fields: Vec<String>,

    /// Entity display name whose records are summarised, not diffed
    pub assignment_entity: String,

    pub messages: Messages,
}

fn owned_pairs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for AuditVocabulary {
    fn default() -> Self {
        let field_labels = owned_pairs(&[
            ("is_active", "Estado"),
            ("comments", "Comentario"),
            ("name", "Nombre"),
            ("email", "Correo"),
            ("role_id", "Rol"),
            ("employee_id", "Empleado"),
            ("device_id", "Equipo"),
            ("unit_id", "Unidad"),
            ("inventory_code", "N° Inventario"),
            ("brand", "Marca"),
            ("model", "Modelo"),
            ("serial_number", "Serie"),
            ("status", "Estado"),
            ("provider", "Proveedor"),
            ("invoice_number", "Factura"),
            ("total_amount", "Monto"),
            ("note", "Nota"),
            ("job_title", "Cargo"),
            ("purchase_date", "Fecha de Compra"),
            ("created_at", "Fecha de Creación"),
            ("updated_at", "Última Actualización"),
        ]);

        let entity_labels = owned_pairs(&[
            ("Device", "Dispositivo"),
            ("Assignment", "Asignación"),
            ("User", "Usuario"),
            ("Role", "Rol"),
            ("Employee", "Empleado"),
            ("Unit", "Unidad"),
            ("Category", "Categoría"),
            ("Purchase", "Compra"),
        ]);

        let allow_lists = [
            (
                "Dispositivo",
                &["inventory_code", "status", "brand", "model", "comments"][..],
            ),
            ("Usuario", &["name", "email", "is_active"][..]),
            ("Empleado", &["name", "status", "job_title"][..]),
            ("Compra", &["provider", "invoice_number", "total_amount"][..]),
            ("Unidad", &["name"][..]),
            ("Rol", &["name"][..]),
            ("Categoría", &["name"][..]),
            ("Asignación", &["note", "status"][..]),
            (DEFAULT_ALLOW_LIST, &["name", "inventory_code"][..]),
        ]
        .into_iter()
        .map(|(entity, fields)| (entity.to_string(), owned_list(fields)))
        .collect();

        Self {
            version: VOCABULARY_VERSION,
            field_labels,
            entity_labels,
            allow_lists,
            relation_fields: owned_list(&["employee_id", "device_id", "role_id", "unit_id"]),
            bookkeeping_fields: owned_list(&["id", "created_at", "updated_at"]),
            assignment_entity: "Asignación".into(),
            messages: Messages::default(),
        }
    }
}

impl AuditVocabulary {
    /// Load a vocabulary file; tables it omits keep their built-in values
    pub fn load(path: &Path) -> AssetDeskResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AssetDeskError::Io(format!(
                "Failed to read vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            AssetDeskError::Config(format!(
                "Failed to parse vocabulary {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load the user's vocabulary override if present, else the built-in one
    pub fn load_or_builtin(paths: &AssetDeskPaths) -> AssetDeskResult<Self> {
        let path = paths.vocabulary_file();
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading vocabulary override");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Turn `App\Models\Device` into its display name
    ///
    /// Unknown types come back as their last path segment.
    pub fn entity_display_name(&self, auditable_type: &str) -> String {
        let short = auditable_type
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(auditable_type);

        self.entity_labels
            .get(short)
            .cloned()
            .unwrap_or_else(|| short.to_string())
    }

    /// Label for a field key, humanising keys that have no translation
    pub fn field_label(&self, key: &str) -> String {
        self.field_labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.replace('_', " "))
    }

    /// Fields shown when an entity is created
    pub fn allow_list(&self, entity: &str) -> &[String] {
        self.allow_lists
            .get(entity)
            .or_else(|| self.allow_lists.get(DEFAULT_ALLOW_LIST))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_relation_field(&self, key: &str) -> bool {
        self.relation_fields.iter().any(|f| f == key)
    }

    pub fn is_bookkeeping_field(&self, key: &str) -> bool {
        self.bookkeeping_fields.iter().any(|f| f == key)
    }

    pub fn is_assignment(&self, entity: &str) -> bool {
        entity == self.assignment_entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entity_display_name() {
        let vocab = AuditVocabulary::default();
        assert_eq!(vocab.entity_display_name("App\\Models\\Device"), "Dispositivo");
        assert_eq!(vocab.entity_display_name("Purchase"), "Compra");
        assert_eq!(vocab.entity_display_name("App\\Models\\Supplier"), "Supplier");
        assert_eq!(vocab.entity_display_name(""), "");
    }

    #[test]
    fn test_field_label_fallback() {
        let vocab = AuditVocabulary::default();
        assert_eq!(vocab.field_label("inventory_code"), "N° Inventario");
        assert_eq!(vocab.field_label("warranty_end_date"), "warranty end date");
        assert_eq!(vocab.field_label("x"), "x");
    }

    #[test]
    fn test_allow_list_falls_back_to_default() {
        let vocab = AuditVocabulary::default();
        assert_eq!(vocab.allow_list("Unidad"), ["name".to_string()]);
        assert_eq!(
            vocab.allow_list("Supplier"),
            ["name".to_string(), "inventory_code".to_string()]
        );
    }

    #[test]
    fn test_allow_list_without_default_is_empty() {
        let mut vocab = AuditVocabulary::default();
        vocab.allow_lists.clear();
        assert!(vocab.allow_list("Dispositivo").is_empty());
    }

    #[test]
    fn test_field_classes() {
        let vocab = AuditVocabulary::default();
        assert!(vocab.is_relation_field("employee_id"));
        assert!(!vocab.is_relation_field("category_id"));
        assert!(vocab.is_bookkeeping_field("updated_at"));
        assert!(vocab.is_assignment("Asignación"));
    }

    #[test]
    fn test_partial_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocabulary.json");
        std::fs::write(
            &path,
            r#"{"version": 7, "entity_labels": {"Device": "Equipo"}}"#,
        )
        .unwrap();

        let vocab = AuditVocabulary::load(&path).unwrap();
        assert_eq!(vocab.version, 7);
        assert_eq!(vocab.entity_display_name("App\\Models\\Device"), "Equipo");
        // Untouched tables keep the built-in content
        assert_eq!(vocab.field_label("brand"), "Marca");
        assert_eq!(vocab.messages.record_created, "Registro creado");
    }

    #[test]
    fn test_load_or_builtin_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let vocab = AuditVocabulary::load_or_builtin(&paths).unwrap();
        assert_eq!(vocab, AuditVocabulary::default());
    }
}
