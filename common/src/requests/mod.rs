use crate::model::issue::{IssueType, Severity};
use serde::Serialize;

/// Body of `POST /api/analyze`: the id returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub file_id: String,
}

/// Body of `POST /api/analysis/{id}/generate-issue-analysis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateIssueAnalysisRequest {
    pub issue_type: IssueType,
    pub column: Option<String>,
    pub severity: Severity,
    pub count: u64,
    pub percentage: f64,
    pub description: String,
}

/// Query of `GET /api/analysis/{id}/affected-rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedRowsQuery {
    pub issue_type: IssueType,
    pub column: Option<String>,
    pub limit: u32,
    pub offset: u64,
}

impl AffectedRowsQuery {
    /// Query-string pairs in the order the server documents them. The
    /// `column` pair is left out for dataset-wide issues.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("issue_type", self.issue_type.label().to_string()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(column) = self.column.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("column", column.to_string()));
        }
        pairs
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}
