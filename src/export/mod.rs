//! Export module for AssetDesk
//!
//! Exports rendered audit records in multiple formats:
//! - CSV: spreadsheet-compatible, one row per record
//! - JSON: machine-readable, keeps structured details
//! - YAML: human-readable archive

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_audits_csv;
pub use self::json::{export_audits_json, AuditExport, ExportedAudit, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_audits_yaml;
