//! Audit log display formatting
//!
//! Formats rendered audit records as a terminal table.

use std::fmt::Write;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::api::Pagination;
use crate::audit::{Messages, RenderedAudit};

/// Column headers of the audit table
pub const AUDIT_HEADERS: [&str; 5] = ["RESPONSABLE", "ACCIÓN", "MÓDULO", "DETALLES", "FECHA"];

/// Format a timestamp with the user's strftime pattern, `-` when missing
pub fn format_timestamp(
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    date_format: &str,
) -> String {
    let Some(at) = created_at else {
        return "-".to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", at.format(date_format)).is_err() {
        tracing::warn!(date_format, "Unsupported date format");
        return "-".to_string();
    }
    out
}

/// Module column: entity name, plus the record's own name on a second line
pub fn format_module(row: &RenderedAudit) -> String {
    match &row.entity_name {
        Some(name) => format!("{}\n{}", row.entity, name),
        None => row.entity.clone(),
    }
}

/// Format a page of rendered audits as a table
pub fn format_audit_table(rows: &[RenderedAudit], messages: &Messages, date_format: &str) -> String {
    if rows.is_empty() {
        return messages.no_records.clone();
    }

    let mut builder = Builder::default();
    builder.push_record(AUDIT_HEADERS.map(String::from));

    for row in rows {
        builder.push_record([
            row.actor.clone(),
            row.event.clone(),
            format_module(row),
            row.details.to_lines(messages).join("\n"),
            format_timestamp(row.created_at, date_format),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

/// One-line page summary shown under the table
pub fn format_page_footer(pagination: &Pagination) -> String {
    format!(
        "Página {} de {} · {} registros ({}-{})",
        pagination.current_page,
        pagination.last_page,
        pagination.total,
        pagination.from,
        pagination.to
    )
}
