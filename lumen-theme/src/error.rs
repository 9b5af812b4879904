//! # Theme Error Types
//!
//! Error types shared by palettes, the theme registry and theme configuration.
//! Configuration mistakes (an unknown role or preset name, a malformed color)
//! are reported as errors instead of being replaced by a fallback color.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the theming system.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A color role name did not match any [ColorRole](crate::palette::ColorRole).
    #[error("Unknown color role '{name}'")]
    UnknownRole {
        /// The name that failed to resolve.
        name: String,
    },

    /// Theme with the specified name was not found.
    #[error("Theme '{name}' not found")]
    ThemeNotFound {
        /// The name of the theme that was not found.
        name: String,
    },

    /// Theme configuration file was not found.
    #[error("Theme file not found: {path:?}")]
    ThemeFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Error parsing theme configuration file.
    #[error("Failed to parse theme file {path:?}: {details}")]
    ThemeParseError {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// A color string could not be parsed.
    #[error("Invalid color '{value}': {reason}")]
    InvalidColor {
        /// The offending input.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A theme listener reported a failure while handling a palette change.
    #[error("Theme listener failed: {message}")]
    ListenerFailed {
        /// Error message reported by the listener.
        message: String,
    },

    /// Error setting up file watcher for hot reload.
    #[error("Failed to setup file watcher: {source}")]
    FileWatcherError {
        /// The underlying error.
        #[source]
        source: notify::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing or deserializing theme data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an unknown role error.
    pub fn unknown_role(name: impl Into<String>) -> Self {
        Self::UnknownRole { name: name.into() }
    }

    /// Create a theme not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ThemeNotFound { name: name.into() }
    }

    /// Create a theme file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ThemeFileNotFound { path: path.into() }
    }

    /// Create a theme parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ThemeParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an invalid color error.
    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a listener failure.
    pub fn listener_failed(message: impl Into<String>) -> Self {
        Self::ListenerFailed {
            message: message.into(),
        }
    }

    /// Create a file watcher error.
    pub fn watcher_error(source: notify::Error) -> Self {
        Self::FileWatcherError { source }
    }

    /// Check if this error means a name could not be resolved.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ThemeError::ThemeNotFound { .. }
                | ThemeError::ThemeFileNotFound { .. }
                | ThemeError::UnknownRole { .. }
        )
    }
}

impl From<toml::de::Error> for ThemeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<notify::Error> for ThemeError {
    fn from(err: notify::Error) -> Self {
        Self::watcher_error(err)
    }
}
