use std::sync::Arc;

use crate::embed::Embedder;
use crate::error::{RagError, Result};
use crate::rag::config::{validate_threshold, RetrievalConfig};
use crate::rag::context::RetrievedRecord;
use crate::select::TopKSelector;
use crate::store::{verify_pairing, EmbeddingStore, LazyStore, RecordStore};
use crate::vector::cosine;

/// Embeds a query and returns the K most similar records from the corpus.
///
/// Stores are shared handles loaded on first use; the service keeps no
/// per-query state, so one instance can serve concurrent queries.
pub struct RetrievalService<E: ?Sized> {
    embedder: Arc<E>,
    embeddings: Arc<LazyStore<EmbeddingStore>>,
    records: Arc<LazyStore<RecordStore>>,
}

impl<E: ?Sized> Clone for RetrievalService<E> {
    fn clone(&self) -> Self {
        Self {
            embedder: Arc::clone(&self.embedder),
            embeddings: Arc::clone(&self.embeddings),
            records: Arc::clone(&self.records),
        }
    }
}

impl<E: Embedder + ?Sized> RetrievalService<E> {
    pub fn new(
        embedder: Arc<E>,
        embeddings: Arc<LazyStore<EmbeddingStore>>,
        records: Arc<LazyStore<RecordStore>>,
    ) -> Self {
        Self {
            embedder,
            embeddings,
            records,
        }
    }

    /// Top `k` records scoring at least `threshold`, most similar first.
    ///
    /// Every query re-scores the whole corpus. Embedder errors surface as
    /// [`RagError::EmbeddingFailure`] and are not retried.
    pub async fn query(&self, text: &str, k: usize, threshold: f32) -> Result<Vec<RetrievedRecord>> {
        validate_threshold(threshold)?;

        let embeddings = self.embeddings.load()?;
        let records = self.records.load()?;

        // Skip the model call when the embedder already declares a wrong width
        if let (Some(expected), Some(got)) = (embeddings.dimension(), self.embedder.dimension()) {
            if expected != got {
                return Err(RagError::DimensionMismatch { expected, got });
            }
        }

        let query = self.embedder.embed(text).await.map_err(as_embedding_failure)?;

        rank(&embeddings, &records, &query, k, threshold)
    }

    pub async fn query_with(&self, text: &str, config: &RetrievalConfig) -> Result<Vec<RetrievedRecord>> {
        self.query(text, config.top_k, config.threshold).await
    }

    /// Eagerly check that every embedded identifier has a record.
    pub fn check_integrity(&self) -> Result<()> {
        let embeddings = self.embeddings.load()?;
        let records = self.records.load()?;
        verify_pairing(&embeddings, &records)
    }

    pub fn embeddings(&self) -> &Arc<LazyStore<EmbeddingStore>> {
        &self.embeddings
    }

    pub fn records(&self) -> &Arc<LazyStore<RecordStore>> {
        &self.records
    }
}

fn as_embedding_failure(e: RagError) -> RagError {
    match e {
        RagError::EmbeddingFailure(_) => e,
        other => RagError::EmbeddingFailure(other.to_string()),
    }
}

/// Score `query` against every stored vector and resolve the best `k`.
///
/// Fails without a partial result if the query dimension is wrong or any
/// embedded identifier lacks a record.
pub fn rank(
    embeddings: &EmbeddingStore,
    records: &RecordStore,
    query: &[f32],
    k: usize,
    threshold: f32,
) -> Result<Vec<RetrievedRecord>> {
    if let Some(expected) = embeddings.dimension() {
        if query.len() != expected {
            return Err(RagError::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }
    }

    let mut selector = TopKSelector::new(k);
    let mut admitted = 0usize;

    for (id, vector) in embeddings.iter() {
        if !records.contains(id) {
            tracing::warn!(id, "embedded identifier has no record");
            return Err(RagError::integrity(id, RagError::NotFound(id.to_string())));
        }

        let score = cosine(query, vector)?;

        // NaN (zero-magnitude vector) compares false and is never admitted
        if score >= threshold {
            selector.push(id, score);
            admitted += 1;
        }
    }

    tracing::debug!(
        k,
        threshold,
        scanned = embeddings.len(),
        admitted,
        kept = selector.len(),
        "ranked corpus"
    );

    selector
        .drain_descending()
        .into_iter()
        .map(|(id, score)| {
            let text = records.get(id).map_err(|e| RagError::integrity(id, e))?;
            Ok(RetrievedRecord {
                id: id.to_string(),
                text: text.to_string(),
                score,
            })
        })
        .collect()
}
