// folio-rag/src/embed/mod.rs
//
// The embedder is an external collaborator: the retrieval core only needs
// `embed(text) -> vector` with a stable dimension per corpus.
//
// Adapters:
// - OnnxEmbedder (feature `onnx`) - in-process tract inference
// - JsEmbedder - wraps a JS callback, e.g. a transformers.js pipeline

pub mod config;
pub mod js;
pub mod pool;

#[cfg(feature = "onnx")]
pub mod model;
#[cfg(feature = "onnx")]
pub mod tokenize;

pub use config::{EmbedConfig, OnnxModel};
pub use js::JsEmbedder;
pub use pool::{mean_pool, mean_pool_masked};

#[cfg(feature = "onnx")]
pub use model::OnnxEmbedder;

use async_trait::async_trait;

use crate::error::Result;
use crate::vector::Embedding;

/// Turns text into an embedding.
///
/// Implementations report failures as [`RagError::EmbeddingFailure`]. Futures
/// are not required to be `Send` so browser-backed embedders can implement
/// this directly.
///
/// [`RagError::EmbeddingFailure`]: crate::error::RagError::EmbeddingFailure
#[async_trait(?Send)]
pub trait Embedder {
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Output dimension, when known ahead of the first call
    fn dimension(&self) -> Option<usize> {
        None
    }
}
