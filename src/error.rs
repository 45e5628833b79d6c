//! Error types for FolioRag

use thiserror::Error;

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Errors raised by the retrieval core.
///
/// The core never swallows these; the calling layer decides whether a failed
/// retrieval degrades to "no context" or surfaces to the user.
#[derive(Error, Debug)]
pub enum RagError {
    /// Query and stored vector lengths differ (corpus/model mismatch)
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The external embedder failed or is unavailable
    #[error("embedding failure: {0}")]
    EmbeddingFailure(String),

    /// Lookup by identifier found nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// An identifier has an embedding but no record text
    #[error("corpus integrity error: `{id}` has an embedding but no record")]
    CorpusIntegrity {
        id: String,
        #[source]
        source: Box<RagError>,
    },

    /// A corpus artifact parsed but its contents are unusable
    #[error("invalid artifact: {0}")]
    Artifact(String),

    /// Caller supplied an out-of-range argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RagError {
    /// Wrap a failed record lookup for `id` as an integrity violation.
    pub(crate) fn integrity(id: &str, source: RagError) -> Self {
        Self::CorpusIntegrity {
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}
