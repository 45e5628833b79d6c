use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One retrieved record, in relevance order within a result.
///
/// Only `id` and `text` are serialized into the prompt; the score stays on
/// the Rust side for logging and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedRecord {
    pub id: String,
    pub text: String,
    #[serde(skip)]
    pub score: f32,
}

/// Render retrieved records as the context block embedded in the prompt:
/// a JSON array of `{ "id", "text" }` objects with two-space indentation.
pub fn to_context_json(records: &[RetrievedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_json_shape() {
        let records = vec![
            RetrievedRecord { id: "b".into(), text: "beta".into(), score: 0.9 },
            RetrievedRecord { id: "a".into(), text: "alpha".into(), score: 0.4 },
        ];

        let json = to_context_json(&records).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"id\": \"b\",\n    \"text\": \"beta\"\n  },\n  {\n    \"id\": \"a\",\n    \"text\": \"alpha\"\n  }\n]"
        );
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(to_context_json(&[]).unwrap(), "[]");
    }
}
