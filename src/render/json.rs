//! JSON rendering for records and document trees.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a record or a tree to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResumeRecord;

    #[test]
    fn test_to_json_pretty() {
        let mut record = ResumeRecord::new();
        record.personal.full_name = "Ada".to_string();

        let json = to_json(&record, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"fullName\": \"Ada\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_tree_to_json_compact() {
        let tree = crate::layout::layout(&ResumeRecord::new(), "template-07");

        let json = to_json(&tree, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"variantId\":\"template-07\""));
        assert!(json.contains("\"family\":\"sidebar\""));
    }
}
