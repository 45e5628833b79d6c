//! FolioRag: semantic retrieval for a static portfolio corpus
//!
//! A Rust/WASM implementation of the chat assistant's retrieval step: given a
//! user message, return the K most similar corpus records for the prompt.
//!
//! # Architecture
//!
//! ## Core
//! - `vector/` - one-pass cosine similarity
//! - `select/` - bounded min-heap top-K selection
//! - `store/` - embedding and record stores, lazily parsed from JSON artifacts
//! - `rag/service.rs` - RetrievalService: embed → score → select → resolve
//!
//! ## Collaborators
//! - `embed/` - Embedder trait, ONNX and JS-callback adapters, pooling
//! - `rag/prompt.rs` - system/context message assembly for the chat layer
//!
//! # Usage (Rust)
//! ```ignore
//! use std::sync::Arc;
//! use folio_rag::{ArtifactSource, LazyStore, RetrievalService};
//!
//! let service = RetrievalService::new(
//!     Arc::new(embedder),
//!     Arc::new(LazyStore::new(ArtifactSource::path("data/embeddings.json"))),
//!     Arc::new(LazyStore::new(ArtifactSource::path("data/records.json"))),
//! );
//! let top = service.query("What have you built in Rust?", 8, 0.0).await?;
//! let context = folio_rag::to_context_json(&top)?;
//! ```
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { RagService } from 'folio-rag';
//!
//! await init();
//! const rag = new RagService(recordsJson, embeddingsJson, embedFn);
//! const context = await rag.query("What have you built in Rust?", 8, 0.0);
//! ```

pub mod embed;
pub mod error;
pub mod rag;
pub mod select;
pub mod store;
pub mod vector;

pub use embed::Embedder;
pub use error::{RagError, Result};
pub use rag::{
    rank, to_context_json, ChatMessage, PromptAssembler, RagService, RetrievalConfig,
    RetrievalService, RetrievedRecord, Role, SystemPrompt,
};
pub use select::TopKSelector;
pub use store::{ArtifactSource, EmbeddingStore, LazyStore, RecordStore};
pub use vector::{cosine, Embedding};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("folio-rag v{}", env!("CARGO_PKG_VERSION"))
}
