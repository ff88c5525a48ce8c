//!
//! Satchel: an ordered key-value collection with array ergonomics.
//! This library provides a single container that layers dictionary-style
//! access, array-like positional operations, iteration, serialization, and
//! bulk mutation over one insertion-ordered mapping.
//!
//! ## Core Concepts
//!
//! * **Collection (`collection::Collection`)**: the container itself. Keys
//!   are unique; iteration follows insertion order for text and positional
//!   keys alike.
//! * **Keys (`collection::Key`)**: either a text name or a positional
//!   integer index. The stack/queue operations (`push`, `pop`,
//!   `push_front`, `pop_front`) hand out positional keys automatically.
//! * **Values (`collection::Value`)**: leaf data (null, booleans, numbers,
//!   text) or nested collections, which serialize recursively.
//! * **Capabilities (`collection::traits`)**: `Structured` for values that
//!   flatten into a plain entry mapping (consumed by merge and plain-map
//!   conversion) and `Touchable` for values that react to a collection-wide
//!   broadcast.
//! * **JSON (`collection::encode`)**: conversion to plain nested data and
//!   JSON text, with encoding failures classified by cause.

pub mod collection;

// Re-export the core types for easier access.
pub use collection::{
    Collection, CollectionError, EncodeError, EncodeOptions, Items, Key, Structured, Touchable,
    Value,
};

/// Result type used throughout the Satchel library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Satchel library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured collection errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
        }
    }

    /// Check if this error came from an unsupported merge source.
    pub fn is_merge_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_merge_error(),
        }
    }

    /// Check if this error is a typed accessor mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_type_error(),
        }
    }

    /// Check if this error came from JSON encoding.
    pub fn is_encode_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_encode_error(),
        }
    }
}
