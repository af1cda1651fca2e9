//! Wire types for the Sheets v4 values API.

use serde::{Deserialize, Serialize};

/// Body of `spreadsheets.values.get`. `values` is absent for an empty range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Cells as text. Formatted values arrive as strings already; anything
    /// else is rendered as JSON.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteRange<'a> {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: &'a [Vec<String>],
}

/// Body of `spreadsheets.values.batchUpdate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest<'a> {
    pub value_input_option: &'static str,
    pub data: Vec<WriteRange<'a>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub total_updated_rows: u64,
    #[serde(default)]
    pub total_updated_cells: u64,
}

/// Google's error envelope: `{"error": {"code": 403, "message": "...", "status": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
