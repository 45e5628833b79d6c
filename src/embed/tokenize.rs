// folio-rag/src/embed/tokenize.rs
//
// Tokenization wrapper for BERT-style models

use std::sync::Arc;
use tokenizers::Tokenizer;

use crate::error::{RagError, Result};

/// Tokenizer wrapper for embedding models
pub struct EmbedTokenizer {
    tokenizer: Arc<Tokenizer>,
    max_length: usize,
}

/// Token ids ready for model inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedInput {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

impl TokenizedInput {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Clip every sequence to at most `max_length` tokens
    pub fn truncate(&mut self, max_length: usize) {
        self.input_ids.truncate(max_length);
        self.attention_mask.truncate(max_length);
        self.token_type_ids.truncate(max_length);
    }
}

impl EmbedTokenizer {
    /// Create tokenizer from tokenizer.json contents
    pub fn from_json(tokenizer_json: &str, max_length: usize) -> Result<Self> {
        let tokenizer = Tokenizer::from_bytes(tokenizer_json.as_bytes())
            .map_err(|e| RagError::EmbeddingFailure(format!("tokenizer load failed: {}", e)))?;

        Ok(Self {
            tokenizer: Arc::new(tokenizer),
            max_length,
        })
    }

    pub fn encode(&self, text: &str) -> Result<TokenizedInput> {
        let encoding = self.tokenizer.encode(text, true)
            .map_err(|e| RagError::EmbeddingFailure(format!("tokenize failed: {}", e)))?;

        let mut input = TokenizedInput {
            input_ids: encoding.get_ids().iter().map(|&id| id as i64).collect(),
            attention_mask: encoding.get_attention_mask().iter().map(|&m| m as i64).collect(),
            token_type_ids: encoding.get_type_ids().iter().map(|&id| id as i64).collect(),
        };
        input.truncate(self.max_length);

        Ok(input)
    }
}
