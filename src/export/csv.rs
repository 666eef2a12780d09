//! CSV Export functionality
//!
//! Exports rendered audit records in a spreadsheet-friendly form: UTF-8 with
//! a byte-order mark and every cell quoted.

use crate::audit::{Messages, RenderedAudit};
use crate::display::audit::{format_module, format_timestamp};
use crate::error::{AssetDeskError, AssetDeskResult};
use ::csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Header row of the CSV export
pub const CSV_HEADERS: [&str; 5] = ["Responsable", "Acción", "Módulo", "Detalles", "Fecha"];

/// Byte-order mark so spreadsheet tools detect UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Export rendered audits to CSV
pub fn export_audits_csv<W: Write>(
    rows: &[RenderedAudit],
    messages: &Messages,
    date_format: &str,
    writer: &mut W,
) -> AssetDeskResult<()> {
    writer
        .write_all(UTF8_BOM)
        .map_err(|e| AssetDeskError::Export(e.to_string()))?;

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AssetDeskError::Export(e.to_string()))?;

    for row in rows {
        let module = format_module(row).replace('\n', " · ");
        let details = row.details.to_plain_text(messages);
        let date = format_timestamp(row.created_at, date_format);

        csv_writer
            .write_record([
                row.actor.as_str(),
                row.event.as_str(),
                module.as_str(),
                details.as_str(),
                date.as_str(),
            ])
            .map_err(|e| AssetDeskError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| AssetDeskError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditDetails, DisplayValue, FieldChange};

    #[test]
    fn test_export_csv() {
        let rows = vec![RenderedAudit {
            id: "1".into(),
            actor: "Ana \"la jefa\"".into(),
            event: "Edición".into(),
            entity: "Usuario".into(),
            entity_name: None,
            details: AuditDetails::Changes(vec![FieldChange {
                key: "email".into(),
                label: "Correo".into(),
                old: None,
                new: Some(DisplayValue::Text {
                    text: "ana@indes.org".into(),
                }),
            }]),
            created_at: None,
        }];

        let mut buffer = Vec::new();
        export_audits_csv(&rows, &Messages::default(), "%d/%m/%Y", &mut buffer).unwrap();

        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(r#""Responsable","Acción","Módulo","Detalles","Fecha""#)
        );
        assert_eq!(
            lines.next(),
            Some(r#""Ana ""la jefa""","Edición","Usuario","Correo: vacío → ana@indes.org","-""#)
        );
    }
}
