//! The analysis history list: fetching, clearing and item formatting.

use crate::backend::Backend;
use crate::error::{DashboardError, FetchError};
use chrono::{DateTime, NaiveDateTime, Utc};
use common::model::analysis::AnalysisResult;
use common::model::history::HistoryEntry;

/// Loads the history list. Failures are logged and yield an empty list.
pub async fn fetch_history(backend: &dyn Backend) -> Vec<HistoryEntry> {
    match backend.history().await {
        Ok(response) if response.success => response.history,
        Ok(_) => {
            log::warn!("history request reported failure");
            Vec::new()
        }
        Err(err) => {
            log::error!("failed to load history: {}", err);
            Vec::new()
        }
    }
}

/// Loads a stored analysis for display.
pub async fn fetch_result(
    backend: &dyn Backend,
    analysis_id: u64,
) -> Result<AnalysisResult, DashboardError> {
    let response = backend.result(analysis_id).await.map_err(|err| {
        log::error!("failed to load analysis {}: {}", analysis_id, err);
        DashboardError::Analysis("Failed to load analysis".to_string())
    })?;
    match response.data {
        Some(result) if response.success => Ok(result),
        _ => Err(DashboardError::Analysis(
            response
                .message
                .unwrap_or_else(|| "Failed to load analysis".to_string()),
        )),
    }
}

/// What a clear attempt produced. `entries` is the freshly reloaded list and
/// is present whatever `result` says.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearOutcome {
    /// Success message, or the reason the server refused.
    pub result: Result<String, DashboardError>,
    pub entries: Vec<HistoryEntry>,
}

impl ClearOutcome {
    /// Toast text for the outcome.
    pub fn toast(&self) -> String {
        match &self.result {
            Ok(message) => message.clone(),
            Err(err) => format!("Failed to clear history: {}", err),
        }
    }
}

/// Deletes the history, then always reloads it.
pub async fn clear_history(backend: &dyn Backend) -> ClearOutcome {
    let result = match backend.clear_history().await {
        Ok(response) if response.success => Ok(response
            .message
            .unwrap_or_else(|| "History cleared successfully".to_string())),
        Ok(response) => Err(FetchError::Rejected(
            response
                .message
                .unwrap_or_else(|| "Failed to clear history".to_string()),
        )
        .into()),
        Err(err) => Err(err.into()),
    };
    if let Err(err) = &result {
        log::error!("failed to clear history: {}", err);
    }

    ClearOutcome {
        result,
        entries: fetch_history(backend).await,
    }
}

/// A history reload in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRequest {
    request_id: u64,
}

/// History entries plus the busy flag of the clear control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    clearing: bool,
    next_request: u64,
    pending_reload: Option<u64>,
}

impl HistoryStore {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_clearing(&self) -> bool {
        self.clearing
    }

    /// Starts a reload. Supersedes any reload still in flight.
    pub fn begin_reload(&mut self) -> HistoryRequest {
        self.next_request += 1;
        self.pending_reload = Some(self.next_request);
        HistoryRequest {
            request_id: self.next_request,
        }
    }

    /// Shows reloaded entries. Returns `false` when a newer reload or a clear
    /// superseded `request`.
    pub fn finish_reload(&mut self, request: &HistoryRequest, entries: Vec<HistoryEntry>) -> bool {
        if self.pending_reload != Some(request.request_id) {
            log::warn!("discarding stale history reload {}", request.request_id);
            return false;
        }
        self.pending_reload = None;
        self.entries = entries;
        true
    }

    /// Disables the clear control and abandons reloads issued before it.
    /// Returns `false` if a clear is already running.
    pub fn begin_clear(&mut self) -> bool {
        if self.clearing {
            return false;
        }
        self.clearing = true;
        self.pending_reload = None;
        true
    }

    /// Re-enables the control and shows the reloaded list.
    pub fn finish_clear(&mut self, outcome: &ClearOutcome) {
        self.clearing = false;
        self.entries = outcome.entries.clone();
    }
}

/// Display data of one history item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItemView {
    pub id: u64,
    pub score: String,
    pub filename: String,
    pub meta: String,
    pub when: String,
}

impl HistoryItemView {
    pub fn new(entry: &HistoryEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            score: entry.quality_score.to_string(),
            filename: entry.filename.clone(),
            meta: format!(
                "{} rows × {} columns · {} issues",
                entry.total_rows, entry.total_columns, entry.issues_count
            ),
            when: format_relative(&entry.timestamp, now),
        }
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .map(|naive| naive.and_utc())
}

/// `Just now`, `N min ago`, `N hr ago`, or the date for anything older than a
/// day. Timestamps without an offset are taken as UTC; unparsable ones are
/// shown as is.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else {
        at.format("%-m/%-d/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_times() {
        assert_eq!(format_relative("2024-05-02T11:59:30", now()), "Just now");
        assert_eq!(format_relative("2024-05-02T11:15:00", now()), "45 min ago");
        assert_eq!(format_relative("2024-05-02T08:59:00.5", now()), "3 hr ago");
        assert_eq!(format_relative("2024-04-20T09:00:00Z", now()), "4/20/2024");
    }

    #[test]
    fn future_and_unparsable_timestamps() {
        assert_eq!(format_relative("2024-05-02T12:05:00", now()), "Just now");
        assert_eq!(format_relative("yesterday", now()), "yesterday");
    }

    #[test]
    fn item_view_formats_meta() {
        let entry = HistoryEntry {
            id: 4,
            filename: "labs.csv".into(),
            quality_score: 91,
            total_rows: 1200,
            total_columns: 8,
            issues_count: 3,
            timestamp: "2024-05-02T11:00:00".into(),
        };
        let view = HistoryItemView::new(&entry, now());
        assert_eq!(view.meta, "1200 rows × 8 columns · 3 issues");
        assert_eq!(view.when, "1 hr ago");
        assert_eq!(view.score, "91");
    }

    #[test]
    fn clear_control_reenables_on_finish() {
        let mut store = HistoryStore::default();
        assert!(store.begin_clear());
        assert!(!store.begin_clear());

        store.finish_clear(&ClearOutcome {
            result: Err(DashboardError::Fetch(FetchError::Network("down".into()))),
            entries: Vec::new(),
        });
        assert!(!store.is_clearing());
        assert!(store.begin_clear());
    }

    fn entry(id: u64) -> HistoryEntry {
        HistoryEntry {
            id,
            filename: format!("batch-{}.csv", id),
            quality_score: 70,
            total_rows: 10,
            total_columns: 2,
            issues_count: 1,
            timestamp: "2024-05-02T11:00:00".into(),
        }
    }

    #[test]
    fn reload_issued_before_clear_is_discarded() {
        let mut store = HistoryStore::default();
        let early = store.begin_reload();

        assert!(store.begin_clear());
        store.finish_clear(&ClearOutcome {
            result: Ok("History cleared successfully".into()),
            entries: Vec::new(),
        });

        assert!(!store.finish_reload(&early, vec![entry(1), entry(2)]));
        assert!(store.is_empty());
    }

    #[test]
    fn only_newest_reload_applies() {
        let mut store = HistoryStore::default();
        let first = store.begin_reload();
        let second = store.begin_reload();

        assert!(store.finish_reload(&second, vec![entry(2)]));
        assert!(!store.finish_reload(&first, vec![entry(1)]));
        assert_eq!(store.entries()[0].id, 2);
    }

    #[test]
    fn reload_started_during_clear_still_applies() {
        let mut store = HistoryStore::default();
        assert!(store.begin_clear());
        let during = store.begin_reload();
        store.finish_clear(&ClearOutcome {
            result: Ok("History cleared successfully".into()),
            entries: Vec::new(),
        });

        assert!(store.finish_reload(&during, vec![entry(3)]));
        assert_eq!(store.entries().len(), 1);
    }
}
