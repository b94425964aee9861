//! Persisted application settings
//!
//! A small TOML file in the platform config directory. Settings are read
//! by the shell (zoom, custom CSS/JS), the notification service
//! (enabled flag, sound), and the webview host (tracker blocking).

use crate::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ORG: &str = "org";
const AUTHOR: &str = "Mailport";
const APP: &str = "Mailport";

const SETTINGS_FILE: &str = "settings.toml";

/// User-facing application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Webview zoom factor; 1.0 is 100%
    pub zoom_level: f64,
    /// Whether new-mail notifications are shown at all
    pub notifications_enabled: bool,
    /// Notification sound: "default", "none", or a named system sound
    pub notification_sound: String,
    /// Whether the tracker blocklist is applied to the webview
    pub tracker_blocking_enabled: bool,
    /// Launch the app at login
    pub start_at_login: bool,
    /// Extra CSS injected into the page after each navigation
    pub custom_css: String,
    /// Extra JavaScript evaluated after each navigation
    pub custom_js: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            notifications_enabled: true,
            notification_sound: "default".to_string(),
            tracker_blocking_enabled: true,
            start_at_login: false,
            custom_css: String::new(),
            custom_js: String::new(),
        }
    }
}

impl AppSettings {
    /// Zoom level with a stored zero (never explicitly set) coerced to 1.0.
    pub fn effective_zoom(&self) -> f64 {
        if self.zoom_level == 0.0 {
            1.0
        } else {
            self.zoom_level
        }
    }
}

/// Loads and saves [`AppSettings`] as TOML
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store in the platform config directory, creating it if needed
    pub fn new() -> CoreResult<Self> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(CoreError::MissingDirectories)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            path: config_dir.join(SETTINGS_FILE),
        })
    }

    /// Store backed by an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults
    pub fn load(&self) -> CoreResult<AppSettings> {
        if !self.path.exists() {
            return Ok(AppSettings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Persist settings, creating parent directories as needed
    pub fn save(&self, settings: &AppSettings) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.zoom_level, 1.0);
        assert!(s.notifications_enabled);
        assert_eq!(s.notification_sound, "default");
        assert!(s.tracker_blocking_enabled);
        assert!(!s.start_at_login);
    }

    #[test]
    fn test_effective_zoom_coerces_zero() {
        let mut s = AppSettings::default();
        s.zoom_level = 0.0;
        assert_eq!(s.effective_zoom(), 1.0);
        s.zoom_level = 1.3;
        assert_eq!(s.effective_zoom(), 1.3);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.toml"));

        let mut s = AppSettings::default();
        s.zoom_level = 1.5;
        s.notifications_enabled = false;
        s.notification_sound = "Glass".to_string();
        s.custom_css = "body { background: #111; }".to_string();

        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), s);
    }

    #[test]
    fn test_unknown_fields_in_file_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "zoom_level = 2.0\n").unwrap();

        let loaded = SettingsStore::at(&path).load().unwrap();
        assert_eq!(loaded.zoom_level, 2.0);
        assert!(loaded.notifications_enabled);
    }
}
