//! Configuration module for AssetDesk
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AssetDeskPaths;
pub use settings::Settings;
