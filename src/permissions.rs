//! Role-based capabilities
//!
//! The viewer's role is turned into a [`Capability`] once and passed to the
//! functions that need it. Nothing here reads the current user from global
//! state.

use crate::audit::AuditRecord;
use crate::error::{AssetDeskError, AssetDeskResult};

/// Roles allowed to manage the system (users, roles, audit log)
pub const SUPER_ROLES: [&str; 3] = ["admin", "administrador", "developer"];

/// What the current viewer may see and do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capability {
    pub can_manage_system: bool,
    pub is_developer: bool,
}

impl Capability {
    /// Derive capabilities from a role name; no role means no privileges
    pub fn for_role(role: Option<&str>) -> Self {
        let Some(role) = role.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        let role = role.to_lowercase();

        Self {
            can_manage_system: SUPER_ROLES.contains(&role.as_str()),
            is_developer: is_developer_role(&role),
        }
    }

    /// Fail unless the viewer may open the audit log
    pub fn require_manage_system(&self, action: &str) -> AssetDeskResult<()> {
        if self.can_manage_system {
            Ok(())
        } else {
            Err(AssetDeskError::PermissionDenied(format!(
                "{} requires one of the roles: {}",
                action,
                SUPER_ROLES.join(", ")
            )))
        }
    }
}

/// Expects an already lowercased role name
fn is_developer_role(role: &str) -> bool {
    role.contains("dev") || role.contains("programador")
}

/// Drop records made by developer accounts unless the viewer is one
///
/// Order of the remaining records is preserved.
pub fn filter_visible(records: Vec<AuditRecord>, viewer: &Capability) -> Vec<AuditRecord> {
    if viewer.is_developer {
        return records;
    }

    let before = records.len();
    let visible: Vec<_> = records
        .into_iter()
        .filter(|record| {
            !record
                .actor
                .as_ref()
                .and_then(|actor| actor.role.as_deref())
                .is_some_and(|role| is_developer_role(&role.to_lowercase()))
        })
        .collect();

    if visible.len() != before {
        tracing::debug!(hidden = before - visible.len(), "Hid developer audit records");
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn by(role: Option<&str>, id: &str) -> AuditRecord {
        let user = match role {
            Some(role) => json!({"name": "x", "role": {"name": role}}),
            None => json!(null),
        };
        AuditRecord::from_value(json!({"id": id, "user": user})).unwrap()
    }

    #[test]
    fn test_super_roles() {
        assert!(Capability::for_role(Some("Administrador")).can_manage_system);
        assert!(Capability::for_role(Some(" admin ")).can_manage_system);
        assert!(Capability::for_role(Some("DEVELOPER")).can_manage_system);
        assert!(!Capability::for_role(Some("Soporte")).can_manage_system);
        assert!(!Capability::for_role(None).can_manage_system);
        assert!(!Capability::for_role(Some("")).can_manage_system);
    }

    #[test]
    fn test_developer_detection() {
        assert!(Capability::for_role(Some("Programador")).is_developer);
        assert!(Capability::for_role(Some("developer")).is_developer);
        assert!(!Capability::for_role(Some("admin")).is_developer);
    }

    #[test]
    fn test_require_manage_system() {
        let err = Capability::for_role(Some("Digitador"))
            .require_manage_system("Viewing the audit log")
            .unwrap_err();
        assert!(matches!(err, AssetDeskError::PermissionDenied(_)));
        assert!(Capability::for_role(Some("admin"))
            .require_manage_system("Viewing the audit log")
            .is_ok());
    }

    #[test]
    fn test_filter_visible_hides_developer_rows() {
        let records = vec![by(Some("Developer"), "1"), by(Some("admin"), "2"), by(None, "3")];

        let admin = Capability::for_role(Some("admin"));
        let ids: Vec<_> = filter_visible(records.clone(), &admin)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["2", "3"]);

        let dev = Capability::for_role(Some("developer"));
        assert_eq!(filter_visible(records, &dev).len(), 3);
    }
}
