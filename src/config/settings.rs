//! User settings for AssetDesk
//!
//! Manages the API connection, the viewer's role, and the display thresholds
//! used by the audit renderer.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::AssetDeskPaths;
use crate::audit::format::FormatOptions;
use crate::error::AssetDeskError;

/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "ASSETDESK_API_URL";

/// Environment variable overriding `api_token`
pub const TOKEN_ENV: &str = "ASSETDESK_TOKEN";

/// User settings for AssetDesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the inventory REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Role name of the person using this terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,

    /// Strings longer than this made only of hex digits and dashes are hidden
    #[serde(default = "default_identifier_threshold")]
    pub identifier_threshold: usize,

    /// Strings longer than this are shown as a preview
    #[serde(default = "default_preview_threshold")]
    pub preview_threshold: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether relation ids are resolved to names before rendering
    #[serde(default = "default_true")]
    pub resolve_relation_names: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_identifier_threshold() -> usize {
    30
}

fn default_preview_threshold() -> usize {
    25
}

fn default_date_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            api_token: None,
            current_role: None,
            identifier_threshold: default_identifier_threshold(),
            preview_threshold: default_preview_threshold(),
            date_format: default_date_format(),
            resolve_relation_names: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AssetDeskPaths) -> Result<Self, AssetDeskError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AssetDeskError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                AssetDeskError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        settings.apply_env_overrides();
        settings.check_date_format();
        Ok(settings)
    }

    /// Fall back to the default date format when chrono cannot render the pattern
    pub fn check_date_format(&mut self) {
        let unsupported = StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if unsupported {
            tracing::warn!(
                date_format = %self.date_format,
                "Unsupported date format in settings, using the default"
            );
            self.date_format = default_date_format();
        }
    }

    /// Replace connection settings with values from the environment, if set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.api_token = Some(token);
            }
        }
    }

    /// Renderer thresholds taken from these settings
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            identifier_threshold: self.identifier_threshold,
            preview_threshold: self.preview_threshold,
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AssetDeskPaths) -> Result<(), AssetDeskError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AssetDeskError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AssetDeskError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.identifier_threshold, 30);
        assert_eq!(settings.preview_threshold, 25);
        assert!(settings.api_token.is_none());
        assert!(settings.resolve_relation_names);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.current_role = Some("Administrador".into());
        settings.identifier_threshold = 15;

        settings.save(&paths).unwrap();
        assert!(paths.is_initialized());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.current_role.as_deref(), Some("Administrador"));
        assert_eq!(loaded.identifier_threshold, 15);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"preview_threshold": 40}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.preview_threshold, 40);
        assert_eq!(loaded.identifier_threshold, 30);
        assert_eq!(loaded.date_format, "%d/%m/%Y %H:%M");
    }

    #[test]
    fn test_unsupported_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%d/%m/%Y %Q"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y %H:%M");

        let mut custom = Settings {
            date_format: "%Y-%m-%d".into(),
            ..Settings::default()
        };
        custom.check_date_format();
        assert_eq!(custom.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AssetDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AssetDeskError::Config(_)));
    }

    #[test]
    fn test_format_options() {
        let settings = Settings {
            identifier_threshold: 15,
            ..Settings::default()
        };
        let options = settings.format_options();
        assert_eq!(options.identifier_threshold, 15);
        assert_eq!(options.preview_threshold, 25);
    }
}
