//! Embedder backed by a JavaScript callback.
//!
//! Lets the host page keep its own model runtime (for example a
//! transformers.js `feature-extraction` pipeline) while retrieval runs in
//! WASM. The callback receives the query string and returns, directly or via
//! a Promise, one of:
//! - a `Float32Array` or `number[]` (already pooled)
//! - `number[][]` token vectors, mean-pooled here
//! - `number[][][]` batched token vectors (`tensor.tolist()`), first batch used

use async_trait::async_trait;
use js_sys::{Float32Array, Function, Promise};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::embed::pool::mean_pool;
use crate::embed::Embedder;
use crate::error::{RagError, Result};
use crate::vector::Embedding;

pub struct JsEmbedder {
    callback: Function,
}

impl JsEmbedder {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

fn js_failure(e: JsValue) -> RagError {
    RagError::EmbeddingFailure(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[async_trait(?Send)]
impl Embedder for JsEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let returned = self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_str(text))
            .map_err(js_failure)?;

        let value = match returned.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(js_failure)?,
            Err(value) => value,
        };

        if let Some(array) = value.dyn_ref::<Float32Array>() {
            return EmbedOutput::Pooled(array.to_vec()).into_embedding();
        }

        let output: EmbedOutput = serde_wasm_bindgen::from_value(value)
            .map_err(|e| RagError::EmbeddingFailure(format!("unrecognised embedder output: {}", e)))?;
        output.into_embedding()
    }
}

/// Shapes a JS embedder may hand back
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EmbedOutput {
    Pooled(Vec<f32>),
    Tokens(Vec<Vec<f32>>),
    Batched(Vec<Vec<Vec<f32>>>),
}

impl EmbedOutput {
    pub(crate) fn into_embedding(self) -> Result<Embedding> {
        match self {
            Self::Pooled(v) if v.is_empty() => {
                Err(RagError::EmbeddingFailure("embedder returned an empty vector".to_string()))
            }
            Self::Pooled(v) => Ok(v),
            Self::Tokens(tokens) => mean_pool(&tokens),
            Self::Batched(batches) => match batches.first() {
                Some(tokens) => mean_pool(tokens),
                None => Err(RagError::EmbeddingFailure("embedder returned an empty batch".to_string())),
            },
        }
    }
}
