//! Audit log rendering
//!
//! Turns raw audit records from the inventory API into readable details.
//!
//! - `entry`: wire rows and the typed [`AuditRecord`]
//! - `tables`: field/entity translations and allow-lists
//! - `format`: per-value formatting and redaction
//! - `catalog`: relation id -> name lookups
//! - `diff`: field-level details per record

pub mod catalog;
pub mod diff;
pub mod entry;
pub mod format;
pub mod tables;

pub use catalog::{RelationCatalog, CATALOG_SOURCES};
pub use diff::{AuditDetails, AuditRenderer, CreationItem, FieldChange, RenderedAudit};
pub use entry::{Actor, AuditEvent, AuditLogRow, AuditRecord, Changes};
pub use format::{DisplayValue, FormatOptions, ValueFormatter};
pub use tables::{AuditVocabulary, Messages};
