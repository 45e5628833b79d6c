use std::collections::BTreeMap;

use crate::error::{RagError, Result};
use crate::vector::Embedding;
use super::artifact::Artifact;

/// Identifier -> precomputed embedding.
///
/// All vectors share one dimension, checked at construction. Iteration is in
/// identifier order so repeated scans over the same corpus are reproducible.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingStore {
    vectors: BTreeMap<String, Embedding>,
    dimension: Option<usize>,
}

impl EmbeddingStore {
    /// Build from an in-memory map, validating dimensions.
    pub fn from_map(vectors: BTreeMap<String, Embedding>) -> Result<Self> {
        let mut dimension = None;

        for (id, vector) in &vectors {
            if vector.is_empty() {
                return Err(RagError::Artifact(format!("embedding for `{}` is empty", id)));
            }
            match dimension {
                None => dimension = Some(vector.len()),
                Some(d) if d != vector.len() => {
                    return Err(RagError::Artifact(format!(
                        "embedding for `{}` has {} dimensions, expected {}",
                        id,
                        vector.len(),
                        d
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self { vectors, dimension })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let vectors: BTreeMap<String, Embedding> = serde_json::from_slice(bytes)?;
        Self::from_map(vectors)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_slice(json.as_bytes())
    }

    /// Serialize back to the artifact format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.vectors)?)
    }

    pub fn get(&self, id: &str) -> Result<&[f32]> {
        self.vectors
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| RagError::NotFound(id.to_string()))
    }

    /// Shared vector dimension, `None` for an empty store
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.vectors.iter().map(|(id, v)| (id.as_str(), v.as_slice()))
    }
}

impl Artifact for EmbeddingStore {
    const KIND: &'static str = "embeddings";

    fn parse(bytes: &[u8]) -> Result<Self> {
        Self::from_json_slice(bytes)
    }

    fn entries(&self) -> usize {
        self.len()
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let store = EmbeddingStore::from_json_str(r#"{"a": [1.0, 0.5], "b": [0.0, -2.0]}"#).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.dimension(), Some(2));
        assert_eq!(store.get("b").unwrap(), &[0.0, -2.0]);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let store = EmbeddingStore::from_json_str(r#"{"a": [1.0]}"#).unwrap();
        assert!(matches!(store.get("zzz"), Err(RagError::NotFound(id)) if id == "zzz"));
    }

    #[test]
    fn test_rejects_mixed_dimensions() {
        let err = EmbeddingStore::from_json_str(r#"{"a": [1.0, 0.0], "b": [1.0]}"#).unwrap_err();
        assert!(matches!(err, RagError::Artifact(_)));
    }

    #[test]
    fn test_rejects_empty_vector() {
        let err = EmbeddingStore::from_json_str(r#"{"a": []}"#).unwrap_err();
        assert!(matches!(err, RagError::Artifact(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EmbeddingStore::from_json_str(r#"{"a": "not a vector"}"#).unwrap_err();
        assert!(matches!(err, RagError::Json(_)));
    }

    #[test]
    fn test_empty_store_has_no_dimension() {
        let store = EmbeddingStore::from_json_str("{}").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);
    }

    #[test]
    fn test_float_values_survive_reserialization() {
        let original = EmbeddingStore::from_json_str(
            r#"{"a": [0.1, -0.333333343267, 1e-7, 123456.78]}"#,
        )
        .unwrap();

        let reparsed = EmbeddingStore::from_json_str(&original.to_json().unwrap()).unwrap();
        assert_eq!(original.get("a").unwrap(), reparsed.get("a").unwrap());
    }

    #[test]
    fn test_artifact_reports_dimension() {
        let store = <EmbeddingStore as Artifact>::parse(br#"{"a": [1.0, 2.0, 3.0]}"#).unwrap();
        assert_eq!(Artifact::dimension(&store), Some(3));
        assert_eq!(store.entries(), 1);
    }

    #[test]
    fn test_iteration_is_identifier_ordered() {
        let store =
            EmbeddingStore::from_json_str(r#"{"c": [1.0], "a": [1.0], "b": [1.0]}"#).unwrap();
        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
