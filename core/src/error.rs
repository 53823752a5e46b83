//! Error types for option store operations.
//!
//! Registration and lookup failures are programmer errors (a schema bug, not
//! end-user input); [`StoreError::InvalidValue`] is the one variant expected
//! to surface from user-supplied values, and producers translate it into
//! their own error vocabulary.

use thiserror::Error;

/// Errors that can occur when registering, looking up, or writing options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// An option with the same name is already registered.
    #[error("duplicate option name: '{0}'")]
    DuplicateOption(String),

    /// No option with the given name is registered.
    #[error("option '{0}' not found")]
    OptionNotFound(String),

    /// A written value was rejected by the slot's normalization.
    ///
    /// Carries the option name and the rejected raw value rendered as text.
    #[error("{message}")]
    InvalidValue {
        /// Name of the option that rejected the value.
        option: String,
        /// The rejected raw value, rendered as text.
        value: String,
        /// Human-readable rejection message.
        message: String,
    },
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
