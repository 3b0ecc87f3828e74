//! Response envelopes. The analysis server wraps every payload in an object
//! carrying `success` and, on failure, a human readable `message`.

use crate::model::history::HistoryEntry;
use crate::model::user::CurrentUser;
use serde::Deserialize;

/// `POST /api/upload`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub file_id: Option<String>,
    pub filename: Option<String>,
    pub file_size: Option<u64>,
    pub message: Option<String>,
}

/// Envelopes whose payload sits under `data` (`/api/analyze`,
/// `/api/results/{id}`, affected rows).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// `GET /api/history`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Envelopes that only report an outcome (`DELETE /api/history`, error bodies).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

/// `POST /api/analysis/{id}/generate-issue-analysis`. `analysis` is markdown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateIssueAnalysisResponse {
    #[serde(default)]
    pub success: bool,
    pub analysis: Option<String>,
    pub message: Option<String>,
}

/// `POST /auth/login` and `POST /auth/signup`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Option<CurrentUser>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::affected_rows::AffectedRowsPage;

    #[test]
    fn decodes_failed_envelope_without_data() {
        let response: DataResponse<AffectedRowsPage> = serde_json::from_str(
            r#"{"success": false, "message": "Data file not found"}"#,
        )
        .unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("Data file not found"));
    }

    #[test]
    fn decodes_affected_rows_with_null_cells() {
        let response: DataResponse<AffectedRowsPage> = serde_json::from_str(
            r#"{"success": true, "data": {
                "rows": [{"row_index": 3, "name": "Ann", "age": null}],
                "columns": ["row_index", "name", "age"],
                "total_count": 2, "has_more": false, "affected_column": "age"}}"#,
        )
        .unwrap();

        let page = response.data.unwrap();
        assert_eq!(page.rows.len(), 1);
        assert!(page.rows[0]["age"].is_null());
        assert_eq!(page.affected_column.as_deref(), Some("age"));
    }

    #[test]
    fn history_defaults_to_empty() {
        let response: HistoryResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.history.is_empty());
    }
}
