//! AssetDesk - terminal front-end for an inventory audit log
//!
//! This library fetches audit records from the inventory REST API and turns
//! them into readable details: which fields changed, from what, to what, with
//! identifiers hidden and relation ids resolved to names.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `audit`: Audit records, lookup tables and the diff renderer
//! - `permissions`: Role-based capabilities
//! - `api`: REST client and pagination
//! - `display`: Terminal table formatting
//! - `export`: CSV/JSON/YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use assetdesk::audit::{AuditRecord, AuditRenderer, AuditVocabulary, FormatOptions, RelationCatalog};
//!
//! let vocabulary = AuditVocabulary::default();
//! let catalog = RelationCatalog::new();
//! let renderer = AuditRenderer::new(&vocabulary, &catalog, FormatOptions::default());
//!
//! let record = AuditRecord::from_value(serde_json::json!({
//!     "event": "updated",
//!     "auditable_type": "App\\Models\\Device",
//!     "old_values": {"status": "disponible"},
//!     "new_values": {"status": "asignado"}
//! }))
//! .unwrap();
//!
//! let lines = renderer.details(&record).to_lines(&vocabulary.messages);
//! assert_eq!(lines, ["Estado: disponible → asignado"]);
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod permissions;

pub use error::{AssetDeskError, AssetDeskResult};
