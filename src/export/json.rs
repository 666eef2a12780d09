//! JSON Export functionality
//!
//! Exports a page of rendered audit records with schema versioning.

use crate::audit::{AuditDetails, Messages, RenderedAudit};
use crate::display::audit::{format_module, format_timestamp};
use crate::error::{AssetDeskError, AssetDeskResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One audit record flattened for export
#[derive(Debug, Clone, Serialize)]
pub struct ExportedAudit {
    pub id: String,
    pub actor: String,
    pub event: String,
    pub module: String,
    /// Details as one line, previews expanded
    pub details: String,
    /// Details with their structure kept
    pub details_items: AuditDetails,
    pub date: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ExportedAudit {
    pub fn from_rendered(row: &RenderedAudit, messages: &Messages, date_format: &str) -> Self {
        Self {
            id: row.id.clone(),
            actor: row.actor.clone(),
            event: row.event.clone(),
            module: format_module(row).replace('\n', " · "),
            details: row.details.to_plain_text(messages),
            details_items: row.details.clone(),
            date: format_timestamp(row.created_at, date_format),
            created_at: row.created_at,
        }
    }
}

/// Audit export document
#[derive(Debug, Clone, Serialize)]
pub struct AuditExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Number of exported records
    pub record_count: usize,

    pub records: Vec<ExportedAudit>,
}

impl AuditExport {
    pub fn new(rows: &[RenderedAudit], messages: &Messages, date_format: &str) -> Self {
        let records: Vec<_> = rows
            .iter()
            .map(|row| ExportedAudit::from_rendered(row, messages, date_format))
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            record_count: records.len(),
            records,
        }
    }
}

/// Export rendered audits as JSON
pub fn export_audits_json<W: Write>(
    export: &AuditExport,
    writer: &mut W,
    pretty: bool,
) -> AssetDeskResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| AssetDeskError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| AssetDeskError::Export(e.to_string()))?;
    Ok(())
}
