//! Error types for structured-file merging.
//!
//! File-merge failures are not auto-caught anywhere: calling code decides
//! whether a bad config file is fatal.

use confstack_core::StoreError;
use thiserror::Error;

/// Errors that can occur while merging a structured config file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file's top-level value is not a mapping.
    #[error("config file must contain a top-level mapping")]
    NotAMapping,

    /// A key does not name any file-compatible option.
    #[error("config key '{0}' does not match any option")]
    UnknownKey(String),

    /// A value does not match its option's expected shape.
    #[error("config key '{key}' expects {expected}, got {got}")]
    ShapeMismatch {
        /// The offending key.
        key: String,
        /// Description of the expected shape.
        expected: String,
        /// What the file actually contained.
        got: String,
    },

    /// A structurally valid value was rejected at write time (e.g. an enum
    /// non-member). Carries the offending raw value.
    #[error("config key '{key}': {message}")]
    InvalidConfigValue {
        /// The offending key.
        key: String,
        /// The rejected raw value, rendered as text.
        value: String,
        /// Human-readable rejection message.
        message: String,
    },

    /// Schema misuse while writing through the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for results with [`FileError`].
pub type Result<T> = std::result::Result<T, FileError>;
