//! Error types for reshape

use thiserror::Error;

/// Errors raised at the boundary where external data enters the tree engine.
///
/// The traversals themselves never fail; only decoding input and writing
/// output can.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A mapping was required but some other kind of value was supplied.
    #[error("Expected a JSON object, found {found}")]
    NotAMapping { found: &'static str },
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O operation failed while reading or writing records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReshapeError>;
