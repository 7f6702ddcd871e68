//! Error types for version extraction and traversal

use thiserror::Error;

use crate::extract::TagError;

/// Result type for version traversal operations
pub type Result<T> = std::result::Result<T, VersionError>;

/// Version traversal errors
///
/// Traversal errors carry the fully-qualified name of the schema element
/// being visited when they occurred. All of them are fatal for the traversal
/// in progress: there is no skip-and-continue.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("{element}: {source}")]
    Tag {
        element: String,
        #[source]
        source: TagError,
    },

    #[error("{element}: no enum value declared at number {number}")]
    UnresolvedEnumNumber { element: String, number: i32 },

    #[error("{element}: enum field carries no enum descriptor")]
    MissingEnumType { element: String },

    #[error("unknown field {field:?} on message {message}")]
    UnknownField { message: String, field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VersionError {
    /// Attach an element's fully-qualified name to a bare tag error.
    pub(crate) fn tag(element: &str, source: TagError) -> Self {
        VersionError::Tag {
            element: element.to_string(),
            source,
        }
    }
}
