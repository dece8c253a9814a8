//! # Console configuration — `console.toml`
//!
//! Defines the TOML configuration the web binary embeds at build time
//! (filename: [`ConsoleConfig::filename`] = `"console.toml"`). It tells the
//! console where the backend lives and how its lists and notifications
//! behave.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:1337"
//!
//! [devices]
//! page_size = 10          # rows per dashboard page
//!
//! [folders]
//! page_size = 12          # folder cards per page
//!
//! [notifications]
//! dismiss_after_secs = 5
//! ```
//!
//! Every struct implements `Default` so that a missing or empty config file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub devices: DeviceListConfig,
    #[serde(default)]
    pub folders: FolderListConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            devices: DeviceListConfig::default(),
            folders: FolderListConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path and relative file URL is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:1337".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Paging for the dashboard table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceListConfig {
    #[serde(default = "default_device_page_size")]
    pub page_size: usize,
}

fn default_device_page_size() -> usize {
    10
}

impl Default for DeviceListConfig {
    fn default() -> Self {
        Self {
            page_size: default_device_page_size(),
        }
    }
}

/// Paging for the folder grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FolderListConfig {
    #[serde(default = "default_folder_page_size")]
    pub page_size: usize,
}

fn default_folder_page_size() -> usize {
    12
}

impl Default for FolderListConfig {
    fn default() -> Self {
        Self {
            page_size: default_folder_page_size(),
        }
    }
}

/// Notification timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds before a notification dismisses itself.
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_secs: u32,
}

fn default_dismiss_after() -> u32 {
    5
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_secs: default_dismiss_after(),
        }
    }
}

impl ConsoleConfig {
    /// Builder method to point the console at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:1337");
        assert_eq!(config.devices.page_size, 10);
        assert_eq!(config.folders.page_size, 12);
        assert_eq!(config.notifications.dismiss_after_secs, 5);
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [api]
            base_url = "https://devices.example.com"

            [folders]
            page_size = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://devices.example.com");
        assert_eq!(config.folders.page_size, 8);
        assert_eq!(config.devices.page_size, 10);
        assert_eq!(config.notifications.dismiss_after_secs, 5);
    }

    #[test]
    fn test_bare_sections_keep_their_own_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [devices]
            [folders]
            [notifications]
            "#,
        )
        .unwrap();
        assert_eq!(config.devices.page_size, 10);
        assert_eq!(config.folders.page_size, 12);
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_toml_roundtrip_and_override() {
        let config = ConsoleConfig::default().with_base_url("http://api.test");
        let text = config.to_toml().unwrap();
        let parsed = ConsoleConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
