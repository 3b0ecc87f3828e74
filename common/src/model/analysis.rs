use crate::model::issue::Issue;
use serde::{Deserialize, Serialize};

/// Complete result of one analysis run, as returned by `/api/analyze` and
/// `/api/results/{id}`.
///
/// The snapshot is immutable on the client: a new analysis or a history load
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Server-side id of the stored analysis. Absent on payloads that were
    /// never persisted; generation, export and affected rows need it.
    #[serde(rename = "analysis_id", default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<u64>,
    pub filename: String,
    /// Human readable size preformatted by the server (`"1.2 KB"`).
    #[serde(default)]
    pub file_size: String,
    pub total_rows: u64,
    pub total_columns: u64,
    pub quality_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnSummary>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Per-column profile computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub name: String,
    /// Inferred data type (`numeric`, `text`, `email`, `date`, `unknown`).
    #[serde(rename = "type", default)]
    pub data_type: String,
    #[serde(deserialize_with = "crate::model::lenient::f64", default)]
    pub missing_percentage: f64,
    #[serde(deserialize_with = "crate::model::lenient::f64", default)]
    pub unique_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::IssueType;

    #[test]
    fn decodes_server_payload() {
        let payload = r#"{
            "analysis_id": 7,
            "filename": "patients.csv",
            "fileSize": "1.2 KB",
            "timestamp": "2024-05-01T10:00:00",
            "totalRows": 10,
            "totalColumns": 2,
            "qualityScore": 88,
            "columns": [
                {"name": "id", "type": "numeric", "totalValues": 10,
                 "missingPercentage": "0.0", "uniquePercentage": "100.0"},
                {"name": "age", "type": "numeric", "totalValues": 10,
                 "missingPercentage": "20.0", "uniquePercentage": 62.5}
            ],
            "issues": [
                {"type": "Missing Values", "severity": "error", "count": 2,
                 "column": "age", "percentage": "20.0", "description": "missing"}
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(payload).unwrap();

        assert_eq!(result.analysis_id, Some(7));
        assert_eq!(result.file_size, "1.2 KB");
        assert_eq!(result.columns[1].missing_percentage, 20.0);
        assert_eq!(result.columns[1].unique_percentage, 62.5);
        assert_eq!(result.issues[0].issue_type, IssueType::MissingValues);
    }

    #[test]
    fn missing_analysis_id_is_none() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"filename":"a.csv","totalRows":0,"totalColumns":0,"qualityScore":100}"#,
        )
        .unwrap();

        assert_eq!(result.analysis_id, None);
        assert!(result.columns.is_empty());
        assert!(result.issues.is_empty());
    }
}
