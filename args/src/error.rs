//! Error types for command-line parsing.
//!
//! Most variants are end-user input errors; [`ParseError::Store`] wraps the
//! programmer-level failures (an option name in the schema that was never
//! registered). Slot-level value rejections are translated into
//! [`ParseError::InvalidArgument`] at the point of the write so that the
//! user sees the normalization message, not a store internals dump.

use confstack_core::StoreError;
use thiserror::Error;

/// Errors that can occur while resolving a command line.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The token stream ran out where a value was expected.
    #[error("Expected another argument")]
    ExpectedArgument,

    /// A flag name matched nothing in the active flag set.
    #[error("Unrecognized option: '{0}'")]
    UnrecognizedOption(String),

    /// A token did not name any child of the current branch.
    #[error("'{0}' is not a valid command")]
    InvalidCommand(String),

    /// All positionals were consumed and the branch has no children.
    #[error("Too many arguments, did not expect argument {0}")]
    UnexpectedArgument(String),

    /// A required positional was never given; carries its usage fragment.
    #[error("Not enough arguments, expected {0}")]
    NotEnoughArguments(String),

    /// A greedy list extractor never saw its configured terminator.
    #[error("Expected terminator {0}")]
    MissingTerminator(String),

    /// A token could not be converted or was rejected by the option.
    #[error("{0}")]
    InvalidArgument(String),

    /// Schema misuse: an option referenced by the parser does not exist.
    #[error(transparent)]
    Store(#[from] StoreError),
}
