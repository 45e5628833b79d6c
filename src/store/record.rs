use std::collections::BTreeMap;

use crate::error::{RagError, Result};
use super::artifact::Artifact;

/// Identifier -> display text.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<String, String>,
}

impl RecordStore {
    pub fn from_map(records: BTreeMap<String, String>) -> Self {
        Self { records }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_map(serde_json::from_slice(bytes)?))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_slice(json.as_bytes())
    }

    pub fn get(&self, id: &str) -> Result<&str> {
        self.records
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| RagError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Artifact for RecordStore {
    const KIND: &'static str = "records";

    fn parse(bytes: &[u8]) -> Result<Self> {
        Self::from_json_slice(bytes)
    }

    fn entries(&self) -> usize {
        self.len()
    }
}
