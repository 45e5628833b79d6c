// folio-rag/src/embed/config.rs
//
// Configuration for the bundled ONNX embedder

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported ONNX models
///
/// The corpus artifact is produced with all-MiniLM-L6-v2, so query vectors
/// must come from the same model to be comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OnnxModel {
    /// all-MiniLM-L6-v2 - 384 dimensions, lightweight
    #[default]
    #[serde(rename = "all-minilm-l6-v2")]
    AllMiniLML6V2,
}

impl fmt::Display for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllMiniLML6V2 => write!(f, "all-minilm-l6-v2"),
        }
    }
}

impl OnnxModel {
    pub fn dimensions(&self) -> usize {
        match self {
            Self::AllMiniLML6V2 => 384,
        }
    }

    /// Maximum sequence length in tokens; longer inputs are truncated
    pub fn max_length(&self) -> usize {
        512
    }
}

/// Mean pooling over attended tokens is always used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub model: OnnxModel,
    /// L2-normalize outputs. Cosine scoring is scale-invariant, so this only
    /// matters to consumers that use raw dot products.
    pub normalize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbedConfig::default();
        assert_eq!(config.model, OnnxModel::AllMiniLML6V2);
        assert!(!config.normalize);
        assert_eq!(config.model.dimensions(), 384);
        assert_eq!(config.model.to_string(), "all-minilm-l6-v2");
    }

    #[test]
    fn test_partial_json_config() {
        let config: EmbedConfig = serde_json::from_str(r#"{"normalize": true}"#).unwrap();
        assert_eq!(config.model, OnnxModel::AllMiniLML6V2);
        assert!(config.normalize);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let result: std::result::Result<EmbedConfig, _> =
            serde_json::from_str(r#"{"model": "bge-small-en-v1.5"}"#);
        assert!(result.is_err());
    }
}
