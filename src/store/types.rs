use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope the store returns for multi-record reads. A `success: false`
/// response is a store-level failure, not a transport error; `data` may be
/// missing entirely when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

/// Envelope for single-record reads
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Envelope for record updates. `results` carries one entry per submitted
/// record and can report per-record failure even when the envelope itself
/// says `success: true`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<UpdateResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Field-level validation error inside a failed update result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_label: String,
    pub message: String,
}

/// Batch of partial updates. The favorite flag is the only field this crate
/// ever writes, so the patch type names it explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub records: Vec<FavoritePatch>,
}

/// Partial update touching only the favorite flag of one record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FavoritePatch {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn favorite_patch_serializes_store_casing() {
        let request = UpdateRequest {
            records: vec![FavoritePatch {
                id: 9,
                is_favorite: true,
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "records": [{ "Id": 9, "isFavorite": true }] })
        );
    }

    #[test]
    fn update_result_tolerates_missing_fields() {
        let result: UpdateResult = serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(!result.success);
        assert!(result.errors.is_empty());
        assert!(result.data.is_none());
        assert!(result.message.is_none());
    }

    #[test]
    fn field_errors_decode_camel_case_labels() {
        let result: UpdateResult = serde_json::from_value(json!({
            "success": false,
            "errors": [{ "fieldLabel": "isFavorite", "message": "locked" }]
        }))
        .unwrap();
        assert_eq!(result.errors[0].field_label, "isFavorite");
        assert_eq!(result.errors[0].message, "locked");
    }
}
