use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Per-query retrieval settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Maximum number of records injected into the prompt
    pub top_k: usize,
    /// Minimum cosine similarity a record needs, inclusive, in [-1, 1]
    pub threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 8,
            threshold: 0.0,
        }
    }
}

impl RetrievalConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }
}

/// Reject thresholds that cosine scores can never be meaningfully compared to
pub(crate) fn validate_threshold(threshold: f32) -> Result<()> {
    if (-1.0f32..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(RagError::InvalidArgument(format!(
            "threshold must be within [-1, 1], got {}",
            threshold
        )))
    }
}
