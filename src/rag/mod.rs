//! Retrieval pipeline
//!
//! # Architecture
//! ```text
//! Query → Embedder → cosine vs every stored vector → TopKSelector(K)
//!                                                         ↓
//!                  PromptAssembler ← context JSON ← RecordStore lookup
//! ```

mod config;
mod context;
mod prompt;
mod service;
mod wasm;

pub use config::RetrievalConfig;
pub use context::{to_context_json, RetrievedRecord};
pub use prompt::{ChatMessage, PromptAssembler, Role, SystemPrompt};
pub use service::{rank, RetrievalService};
pub use wasm::RagService;
