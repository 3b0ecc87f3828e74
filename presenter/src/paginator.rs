//! Paging through the rows affected by an issue.

use crate::backend::Backend;
use crate::error::{DashboardError, FetchError};
use common::model::affected_rows::{AffectedRowsPage, ROW_INDEX_COLUMN};
use common::model::issue::Issue;
use common::requests::AffectedRowsQuery;
use serde_json::Value;

/// Shown in table cells whose value is `null` or absent.
pub const NULL_CELL: &str = "—";

/// Offset of the first row of a 1-based page.
pub fn page_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}

/// Number of pages needed for `total_count` rows.
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

/// Query for one page of the rows affected by `issue`.
pub fn page_query(issue: &Issue, page: u32, page_size: u32) -> AffectedRowsQuery {
    AffectedRowsQuery {
        issue_type: issue.issue_type.clone(),
        column: issue.column.clone(),
        limit: page_size,
        offset: page_offset(page, page_size),
    }
}

/// Where the user is in the affected-rows table of the selected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    pub current_page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

impl PaginationCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            has_more: false,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.has_more
    }
}

/// Fetches one page, mapping an unsuccessful envelope to an error.
pub async fn fetch_page(
    backend: &dyn Backend,
    analysis_id: u64,
    query: &AffectedRowsQuery,
) -> Result<AffectedRowsPage, DashboardError> {
    log::debug!(
        "loading affected rows of {} (offset {}, limit {})",
        query.issue_type,
        query.offset,
        query.limit
    );
    let response = backend
        .affected_rows(analysis_id, query)
        .await
        .map_err(|err| DashboardError::AffectedRows(err.into_message()))?;
    if !response.success {
        return Err(DashboardError::AffectedRows(
            response
                .message
                .unwrap_or_else(|| "Failed to load affected rows".to_string()),
        ));
    }
    response.data.ok_or_else(|| {
        DashboardError::AffectedRows(
            FetchError::Decode("affected rows response without data".into()).to_string(),
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub key: String,
    /// Header text; `row_index` shows as `#`.
    pub label: String,
    /// `row-index-col`, `highlight-column` or empty.
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub label: String,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Table view model of one non-empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedRowsTable {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub caption: String,
    /// Present only when the rows span more than one page.
    pub pagination: Option<PaginationControls>,
}

impl AffectedRowsTable {
    pub fn new(page: &AffectedRowsPage, page_number: u32, page_size: u32) -> Self {
        let affected = page.affected_column.as_deref();
        let columns = page
            .columns
            .iter()
            .map(|key| {
                let (label, class) = if key == ROW_INDEX_COLUMN {
                    ("#".to_string(), "row-index-col")
                } else if Some(key.as_str()) == affected {
                    (key.clone(), "highlight-column")
                } else {
                    (key.clone(), "")
                };
                TableColumn {
                    key: key.clone(),
                    label,
                    class,
                }
            })
            .collect();

        let rows = page
            .rows
            .iter()
            .map(|row| {
                page.columns
                    .iter()
                    .map(|key| cell_text(row.get(key)))
                    .collect()
            })
            .collect();

        let start = page_offset(page_number, page_size) + 1;
        let end = (start + page.rows.len() as u64 - 1).min(page.total_count);
        let caption = format!(
            "Showing {}-{} of {} affected rows",
            start, end, page.total_count
        );

        let pagination = (page.total_count > u64::from(page_size)).then(|| PaginationControls {
            label: format!(
                "Page {} of {}",
                page_number,
                total_pages(page.total_count, page_size)
            ),
            has_previous: page_number > 1,
            has_next: page.has_more,
        });

        Self {
            columns,
            rows,
            caption,
            pagination,
        }
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_CELL.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::affected_rows::Row;
    use serde_json::json;

    fn row(index: u64, age: Value) -> Row {
        let mut row = Row::new();
        row.insert(ROW_INDEX_COLUMN.to_string(), json!(index));
        row.insert("name".to_string(), json!(format!("p{}", index)));
        row.insert("age".to_string(), age);
        row
    }

    fn page(rows: Vec<Row>, total_count: u64, has_more: bool) -> AffectedRowsPage {
        AffectedRowsPage {
            rows,
            columns: vec![ROW_INDEX_COLUMN.into(), "name".into(), "age".into()],
            total_count,
            has_more,
            affected_column: Some("age".to_string()),
        }
    }

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(page_offset(1, 50), 0);
        assert_eq!(page_offset(3, 50), 100);
        assert_eq!(page_offset(0, 50), 0);
        assert_eq!(total_pages(120, 50), 3);
        assert_eq!(total_pages(100, 50), 2);
    }

    #[test]
    fn table_marks_index_and_affected_columns() {
        let table = AffectedRowsTable::new(&page(vec![row(3, Value::Null)], 2, false), 1, 50);

        assert_eq!(table.columns[0].label, "#");
        assert_eq!(table.columns[0].class, "row-index-col");
        assert_eq!(table.columns[2].class, "highlight-column");
        assert_eq!(table.columns[1].class, "");
        assert_eq!(table.rows[0], vec!["3", "p3", NULL_CELL]);
        assert_eq!(table.caption, "Showing 1-1 of 2 affected rows");
        assert!(table.pagination.is_none());
    }

    #[test]
    fn last_page_caption_and_controls() {
        let rows = (101..=120).map(|i| row(i, json!(i))).collect();
        let table = AffectedRowsTable::new(&page(rows, 120, false), 3, 50);

        assert_eq!(table.caption, "Showing 101-120 of 120 affected rows");
        let controls = table.pagination.unwrap();
        assert_eq!(controls.label, "Page 3 of 3");
        assert!(controls.has_previous);
        assert!(!controls.has_next);
    }

    #[test]
    fn query_omits_column_for_dataset_issues() {
        use common::model::issue::{IssueType, Severity};

        let issue = Issue {
            issue_type: IssueType::DuplicateRecords,
            column: None,
            severity: Severity::Warning,
            count: 4,
            description: String::new(),
            percentage: None,
        };
        let query = page_query(&issue, 2, 25);
        assert_eq!(query.offset, 25);
        assert_eq!(query.limit, 25);
        assert!(query.to_pairs().iter().all(|(key, _)| *key != "column"));
    }
}
