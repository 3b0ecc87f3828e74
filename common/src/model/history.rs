use serde::{Deserialize, Serialize};

/// One row of the analysis history list (`GET /api/history`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    pub filename: String,
    pub quality_score: u32,
    pub total_rows: u64,
    pub total_columns: u64,
    pub issues_count: u64,
    /// ISO-8601 creation time, UTC, usually without offset.
    pub timestamp: String,
}
