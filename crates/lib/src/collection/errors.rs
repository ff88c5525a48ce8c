//! Error types for collection operations.
//!
//! This module defines structured error types for the failures a collection
//! can raise: merging from a value that is not a structured source, typed
//! accessor coercion failures, and the JSON encoding taxonomy. Encoding
//! failures are sub-classified by cause so callers can tell a nesting
//! overflow apart from malformed text.

use thiserror::Error;

/// Structured error types for collection operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectionError {
    /// `merge` was called with a value that cannot act as a merge source.
    /// Only structured values carry an entry mapping to merge from.
    #[error("cannot merge from {found} value: not a structured source")]
    MergeUnsupported { found: &'static str },

    /// A typed accessor asked for a type the stored value does not have
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// JSON encoding failed; see [`EncodeError`] for the cause
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CollectionError {
    /// Check if this error came from an unsupported merge source
    pub fn is_merge_error(&self) -> bool {
        matches!(self, CollectionError::MergeUnsupported { .. })
    }

    /// Check if this error is a typed accessor mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }

    /// Check if this error came from JSON encoding
    pub fn is_encode_error(&self) -> bool {
        matches!(self, CollectionError::Encode(_))
    }

    /// Get the encoding cause if this is an encoding error
    pub fn encode_cause(&self) -> Option<&EncodeError> {
        match self {
            CollectionError::Encode(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Causes of a JSON encoding failure.
///
/// Every variant carries a distinct, human-readable message so failures can
/// be told apart by display text as well as by variant.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The structure nests deeper than the configured limit
    #[error("maximum nesting depth of {limit} exceeded while encoding")]
    DepthExceeded { limit: usize },

    /// The encoder was handed data inconsistent with what it expected
    #[error("encoder state mismatch: {reason}")]
    StateMismatch { reason: String },

    /// A string value contains an unescapable control character
    #[error("invalid control character in string value")]
    ControlCharacter,

    /// The encoder produced or encountered malformed JSON text
    #[error("malformed JSON: {reason}")]
    Syntax { reason: String },

    /// The encoded output was not valid UTF-8
    #[error("malformed UTF-8 in encoded text")]
    InvalidUtf8,

    /// An encoding failure that fits no other cause
    #[error("unknown encoding failure: {reason}")]
    Unknown { reason: String },
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}

impl From<EncodeError> for crate::Error {
    fn from(err: EncodeError) -> Self {
        crate::Error::Collection(CollectionError::Encode(err))
    }
}
