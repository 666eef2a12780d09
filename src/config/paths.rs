//! Path management for AssetDesk
//!
//! Provides XDG-compliant path resolution for configuration and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `ASSETDESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/assetdesk` or `~/.config/assetdesk`
//! 3. Otherwise the platform config directory reported by `directories`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AssetDeskError;

/// Manages all paths used by AssetDesk
#[derive(Debug, Clone)]
pub struct AssetDeskPaths {
    /// Base directory for all AssetDesk data
    base_dir: PathBuf,
}

impl AssetDeskPaths {
    /// Create a new AssetDeskPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, AssetDeskError> {
        let base_dir = if let Ok(custom) = std::env::var("ASSETDESK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AssetDeskPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/assetdesk/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the optional vocabulary override
    pub fn vocabulary_file(&self) -> PathBuf {
        self.base_dir.join("vocabulary.json")
    }

    /// Get the default directory for exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AssetDeskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AssetDeskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| AssetDeskError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if AssetDesk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
fn resolve_default_path() -> Result<PathBuf, AssetDeskError> {
    #[cfg(not(windows))]
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("assetdesk"));
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| AssetDeskError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("assetdesk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.vocabulary_file(),
            temp_dir.path().join("vocabulary.json")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("ASSETDESK_DATA_DIR", custom_path);

        let paths = AssetDeskPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("ASSETDESK_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
    }
}
