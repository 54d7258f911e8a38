//! Uniform result shape returned by every mutation.

use serde::{Deserialize, Serialize};

use crate::types::DbId;
use crate::validation::FieldErrors;

/// `{ success, error?, id?, field_errors?, count? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    /// Per-field validation messages.
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub field_errors: FieldErrors,
    /// Rows touched by a bulk operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl MutationResult {
    /// Success for an operation on a single record.
    pub fn ok(id: DbId) -> Self {
        Self {
            success: true,
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn bulk(count: u64) -> Self {
        Self {
            success: true,
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            success: false,
            error: Some("Validation failed".to_string()),
            field_errors,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_absent_fields() {
        let json = serde_json::to_value(MutationResult::ok(7)).unwrap();
        assert_eq!(json, json!({ "success": true, "id": 7 }));
    }

    #[test]
    fn failure_carries_message() {
        let json = serde_json::to_value(MutationResult::failed("boom")).unwrap();
        assert_eq!(json, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn invalid_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "bad");
        let json = serde_json::to_value(MutationResult::invalid(errors)).unwrap();
        assert_eq!(json["field_errors"], json!({ "phone": "bad" }));
        assert_eq!(json["success"], false);
    }
}
