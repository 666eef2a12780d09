//! REST API access
//!
//! The inventory backend is an external service exposing paginated JSON
//! listings. This module fetches audit pages and the relation listings used
//! to resolve ids to names.

pub mod client;
pub mod pagination;

pub use client::ApiClient;
pub use pagination::{parse_audit_page, AuditQuery, Page, Pagination};
