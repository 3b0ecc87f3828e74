use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the synthetic column carrying the 1-based source row number.
pub const ROW_INDEX_COLUMN: &str = "row_index";

/// A source row keyed by column name. Missing cells are JSON `null`.
pub type Row = Map<String, Value>;

/// One page of rows implicated by an issue
/// (`GET /api/analysis/{id}/affected-rows`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffectedRowsPage {
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Column order for the table, `row_index` first.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub affected_column: Option<String>,
}
