//! YAML Export functionality
//!
//! Exports rendered audit records to YAML for human-readable archiving.

use crate::error::{AssetDeskError, AssetDeskResult};
use crate::export::json::AuditExport;
use std::io::Write;

/// Export rendered audits as YAML
pub fn export_audits_yaml<W: Write>(export: &AuditExport, writer: &mut W) -> AssetDeskResult<()> {
    writeln!(writer, "# AssetDesk Audit Export")
        .map_err(|e| AssetDeskError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| AssetDeskError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AssetDeskError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| AssetDeskError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Messages;

    #[test]
    fn test_export_yaml_empty() {
        let export = AuditExport::new(&[], &Messages::default(), "%d/%m/%Y");
        let mut buffer = Vec::new();
        export_audits_yaml(&export, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# AssetDesk Audit Export"));
        assert!(text.contains("record_count: 0"));
        assert!(text.contains("records: []"));
    }
}
