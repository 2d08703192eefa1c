//! Error types for the glTF scene loader.

use thiserror::Error;

/// Main error type for glTF parsing.
///
/// Every variant describes a structural violation of the document: a missing
/// required field, an index that does not resolve, or a byte range too short
/// for its declared layout. Soft absences (unresolved URIs, optional fields)
/// never produce an error.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is absent
    #[error("Missing required field '{field}' in {context}")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    /// An index references past the end of a collection
    #[error("{kind} index {index} out of bounds (count: {count})")]
    IndexOutOfBounds {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    /// Accessor `type` is not one of the seven element shapes
    #[error("Unknown accessor type: {0}")]
    UnknownAccessorType(String),

    /// Accessor `componentType` is not one of the six component codes
    #[error("Unknown component type: {0}")]
    UnknownComponentType(u64),

    /// An enumerated string or GL code is not recognised
    #[error("Unknown {kind}: {value}")]
    UnknownEnum { kind: &'static str, value: String },

    /// Type mismatch when converting decoded data
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Base64 payload is malformed
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// Byte range is shorter than its declared layout requires
    #[error("Truncated data in {context}: need {needed} bytes, have {available}")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// Invalid data structure in the document
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// A URI could not be resolved and strict resources are enabled
    #[error("Unresolved resource: {0}")]
    UnresolvedResource(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create a missing field error.
    pub fn missing(context: &'static str, field: &'static str) -> Self {
        Self::MissingField { context, field }
    }

    /// Create an out of bounds error.
    pub fn out_of_bounds(kind: &'static str, index: usize, count: usize) -> Self {
        Self::IndexOutOfBounds { kind, index, count }
    }

    /// Create a type mismatch error.
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type alias for glTF operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `index` addresses an element of a collection of `count` items.
#[inline]
pub fn check_index(kind: &'static str, index: usize, count: usize) -> Result<usize> {
    if index < count {
        Ok(index)
    } else {
        Err(Error::out_of_bounds(kind, index, count))
    }
}
