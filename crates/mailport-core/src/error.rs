//! Error types for the core module

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Platform config directory could not be determined
    #[error("Could not determine a configuration directory for this platform")]
    MissingDirectories,

    /// Settings file could not be parsed
    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    /// Blocklist JSON error
    #[error("Failed to parse blocklist: {0}")]
    BlocklistParse(#[from] serde_json::Error),

    /// Blocklist rule failed validation
    #[error("Invalid blocklist rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
