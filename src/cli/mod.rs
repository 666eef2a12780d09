//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the API and render layers.

pub mod audit;

pub use audit::{handle_audit_command, AuditCommands, AuditContext, ExportFormat};
