//! Corpus stores
//!
//! Both stores are built once from a JSON artifact produced by the offline
//! embedding job and are read-only afterwards.
//!
//! # Artifact Formats
//!
//! ```text
//! records.json     { "<id>": "<display text>", ... }
//! embeddings.json  { "<id>": [0.0123, -0.98, ...], ... }
//! ```
//!
//! Every identifier in the embedding artifact must also appear in the record
//! artifact. [`verify_pairing`] checks that eagerly; the retrieval service
//! re-checks it on every query.

mod artifact;
mod embedding;
mod lazy;
mod record;

pub use artifact::{Artifact, ArtifactSource};
pub use embedding::EmbeddingStore;
pub use lazy::LazyStore;
pub use record::RecordStore;

use crate::error::{RagError, Result};

/// Check that every embedded identifier has a record.
///
/// Records without embeddings are allowed; they are simply never retrieved.
pub fn verify_pairing(embeddings: &EmbeddingStore, records: &RecordStore) -> Result<()> {
    for (id, _) in embeddings.iter() {
        if let Err(e) = records.get(id) {
            tracing::warn!(id, "embedded identifier has no record");
            return Err(RagError::integrity(id, e));
        }
    }
    Ok(())
}
