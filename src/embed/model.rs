// folio-rag/src/embed/model.rs
//
// In-process ONNX inference via tract

use async_trait::async_trait;
use std::sync::Arc;
use tract_onnx::prelude::*;

use crate::embed::config::EmbedConfig;
use crate::embed::pool::{l2_normalize, mean_pool_masked};
use crate::embed::tokenize::{EmbedTokenizer, TokenizedInput};
use crate::embed::Embedder;
use crate::error::{RagError, Result};
use crate::vector::Embedding;

/// Type alias for the tract typed model
type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Sentence embedder backed by an ONNX BERT-style encoder.
pub struct OnnxEmbedder {
    model: Arc<TractModel>,
    tokenizer: EmbedTokenizer,
    config: EmbedConfig,
}

fn inference_error(e: impl std::fmt::Display) -> RagError {
    RagError::EmbeddingFailure(e.to_string())
}

impl OnnxEmbedder {
    /// Load model from ONNX bytes and tokenizer JSON
    pub fn from_bytes(model_bytes: &[u8], tokenizer_json: &str, config: EmbedConfig) -> Result<Self> {
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .map_err(inference_error)?
            .into_optimized()
            .map_err(inference_error)?
            .into_runnable()
            .map_err(inference_error)?;

        let tokenizer = EmbedTokenizer::from_json(tokenizer_json, config.model.max_length())?;

        tracing::info!(model = %config.model, dims = config.model.dimensions(), "onnx embedder loaded");

        Ok(Self {
            model: Arc::new(model),
            tokenizer,
            config,
        })
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Embed one text synchronously
    pub fn embed_text(&self, text: &str) -> Result<Embedding> {
        let encoded = self.tokenizer.encode(text)?;
        if encoded.is_empty() {
            return Err(RagError::EmbeddingFailure("tokenizer produced no tokens".to_string()));
        }
        let seq_len = encoded.len();

        let inputs: TVec<TValue> = tvec![
            input_tensor(&encoded.input_ids, seq_len)?.into(),
            input_tensor(&encoded.attention_mask, seq_len)?.into(),
            input_tensor(&encoded.token_type_ids, seq_len)?.into(),
        ];

        let outputs = self.model.run(inputs).map_err(inference_error)?;

        // BERT models output: (batch_size, seq_len, hidden_size)
        let view = outputs[0].to_array_view::<f32>().map_err(inference_error)?;
        let shape = view.shape().to_vec();
        if shape.len() != 3 || shape[0] != 1 || shape[1] != seq_len || shape[2] == 0 {
            return Err(RagError::EmbeddingFailure(format!(
                "unexpected output shape {:?} for {} tokens",
                shape, seq_len
            )));
        }
        let hidden = shape[2];
        let flat: Vec<f32> = view.iter().copied().collect();

        let mut embedding = pool(&flat, hidden, &encoded);
        if self.config.normalize {
            l2_normalize(&mut embedding);
        }

        Ok(embedding)
    }
}

fn input_tensor(data: &[i64], seq_len: usize) -> Result<Tensor> {
    Tensor::from_shape(&[1, seq_len], data).map_err(inference_error)
}

/// Collapse row-major `(seq_len, hidden)` hidden states into one vector
fn pool(flat: &[f32], hidden: usize, encoded: &TokenizedInput) -> Embedding {
    mean_pool_masked(flat.chunks(hidden), &encoded.attention_mask, hidden)
}

#[async_trait(?Send)]
impl Embedder for OnnxEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        self.embed_text(text)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.config.model.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(mask: Vec<i64>) -> TokenizedInput {
        TokenizedInput {
            input_ids: vec![0; mask.len()],
            token_type_ids: vec![0; mask.len()],
            attention_mask: mask,
        }
    }

    #[test]
    fn test_pool_mean_respects_mask() {
        // 3 tokens x 2 hidden
        let flat = [1.0, 1.0, 3.0, 5.0, 50.0, 50.0];
        let pooled = pool(&flat, 2, &encoded(vec![1, 1, 0]));
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn test_pool_fully_attended() {
        let flat = [0.5, -0.5, 1.5, 0.5];
        let pooled = pool(&flat, 2, &encoded(vec![1, 1]));
        assert_eq!(pooled, vec![1.0, 0.0]);
    }

    #[test]
    fn test_garbage_model_bytes_fail() {
        let result = OnnxEmbedder::from_bytes(b"not an onnx model", "{}", EmbedConfig::default());
        assert!(matches!(result, Err(RagError::EmbeddingFailure(_))));
    }
}
