//! State of the issue detail panel: the selected issue, its affected-rows
//! table and its generated analysis.
//!
//! Loads are split in two. `begin_*` mutates the store and returns a request
//! stamped with the current selection epoch and a sequence number; the caller
//! runs the matching async function and hands the outcome to `finish_*`,
//! which drops it if the user has since selected another issue, closed the
//! panel or issued a newer request of the same kind.

use crate::analysis_view::{format_count, format_percentage};
use crate::backend::Backend;
use crate::config::SectionHeaders;
use crate::error::{DashboardError, FetchError};
use crate::markdown::MarkdownRenderer;
use crate::paginator::{self, AffectedRowsTable, PaginationCursor};
use crate::sections::AnalysisSections;
use common::model::affected_rows::AffectedRowsPage;
use common::model::issue::{Issue, IssueType};
use common::requests::{AffectedRowsQuery, GenerateIssueAnalysisRequest};

pub const MISSING_ANALYSIS_ID: &str = "Analysis ID not found. Please re-run the analysis.";

/// Display data of the selected issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDetail {
    pub index: usize,
    pub issue: Issue,
    pub type_label: String,
    pub severity_class: String,
    pub title: String,
    pub description: String,
    pub count: String,
    pub percentage: f64,
    pub percentage_label: String,
    pub helper_text: String,
    pub generate_label: &'static str,
}

impl IssueDetail {
    pub fn new(index: usize, issue: &Issue, total_rows: u64) -> Self {
        let percentage = issue.percentage_of(total_rows);
        let (helper_text, generate_label) = if issue.issue_type == IssueType::StatisticalOutlier {
            (
                "Click the button below to generate AI-powered insights for these outliers."
                    .to_string(),
                "Generate Outlier Analysis",
            )
        } else {
            (
                format!(
                    "Click the button below to generate AI insights for this {} issue.",
                    issue.issue_type.label().to_lowercase()
                ),
                "Generate Analysis",
            )
        };

        Self {
            index,
            issue: issue.clone(),
            type_label: issue.issue_type.label().to_string(),
            severity_class: issue.severity.as_str().to_string(),
            title: issue.title().to_string(),
            description: issue.description.clone(),
            count: format_count(issue.count),
            percentage,
            percentage_label: format_percentage(percentage),
            helper_text,
            generate_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    Hidden,
    Loading,
    /// The server reported no affected rows.
    Empty,
    Loaded(AffectedRowsTable),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Generating,
    Ready(AnalysisSections),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    epoch: u64,
    request_id: u64,
}

/// One affected-rows page to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub token: SelectionToken,
    pub analysis_id: u64,
    pub page: u32,
    pub query: AffectedRowsQuery,
}

/// One analysis generation to run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub token: SelectionToken,
    pub analysis_id: Option<u64>,
    pub issue: Issue,
    pub total_rows: u64,
}

#[derive(Debug)]
pub struct IssueDetailStore {
    page_size: u32,
    epoch: u64,
    next_request: u64,
    pending_page: Option<u64>,
    pending_generation: Option<u64>,
    active: Option<IssueDetail>,
    cursor: PaginationCursor,
    table_expanded: bool,
    table: TableState,
    generation: GenerationState,
    full_analysis_open: bool,
}

impl IssueDetailStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            epoch: 0,
            next_request: 0,
            pending_page: None,
            pending_generation: None,
            active: None,
            cursor: PaginationCursor::new(page_size),
            table_expanded: false,
            table: TableState::Hidden,
            generation: GenerationState::Idle,
            full_analysis_open: false,
        }
    }

    pub fn active(&self) -> Option<&IssueDetail> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn is_table_expanded(&self) -> bool {
        self.table_expanded
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    pub fn is_full_analysis_open(&self) -> bool {
        self.full_analysis_open
    }

    /// Opens the panel on `issue`, resetting table and generation state and
    /// invalidating every request issued for a previous selection.
    pub fn select(&mut self, index: usize, issue: &Issue, total_rows: u64) {
        self.reset();
        self.active = Some(IssueDetail::new(index, issue, total_rows));
    }

    pub fn close(&mut self) {
        self.reset();
        self.active = None;
    }

    fn reset(&mut self) {
        self.epoch += 1;
        self.pending_page = None;
        self.pending_generation = None;
        self.cursor = PaginationCursor::new(self.page_size);
        self.table_expanded = false;
        self.table = TableState::Hidden;
        self.generation = GenerationState::Idle;
        self.full_analysis_open = false;
    }

    fn issue_token(&mut self) -> SelectionToken {
        self.next_request += 1;
        SelectionToken {
            epoch: self.epoch,
            request_id: self.next_request,
        }
    }

    fn is_current(&self, token: SelectionToken, pending: Option<u64>) -> bool {
        token.epoch == self.epoch && pending == Some(token.request_id)
    }

    /// Expands the table and starts loading `page`. Without an analysis id the
    /// table shows an error instead and no request is made.
    pub fn begin_page(&mut self, page: u32, analysis_id: Option<u64>) -> Option<PageRequest> {
        let issue = self.active.as_ref()?.issue.clone();
        self.table_expanded = true;

        let Some(analysis_id) = analysis_id else {
            self.pending_page = None;
            self.table = TableState::Failed(MISSING_ANALYSIS_ID.to_string());
            return None;
        };

        let token = self.issue_token();
        self.pending_page = Some(token.request_id);
        self.table = TableState::Loading;
        Some(PageRequest {
            token,
            analysis_id,
            page: page.max(1),
            query: paginator::page_query(&issue, page, self.page_size),
        })
    }

    /// Applies a page outcome. Returns `false` when the outcome was stale and
    /// ignored.
    pub fn finish_page(
        &mut self,
        request: &PageRequest,
        outcome: Result<AffectedRowsPage, DashboardError>,
    ) -> bool {
        if !self.is_current(request.token, self.pending_page) {
            log::warn!(
                "discarding stale affected rows page {} of {}",
                request.page,
                request.query.issue_type
            );
            return false;
        }
        self.pending_page = None;

        self.table = match outcome {
            Ok(page) if page.rows.is_empty() => TableState::Empty,
            Ok(page) => {
                self.cursor.current_page = request.page;
                self.cursor.has_more = page.has_more;
                TableState::Loaded(AffectedRowsTable::new(&page, request.page, self.page_size))
            }
            Err(err) => {
                log::error!("failed to load affected rows: {}", err);
                TableState::Failed(err.to_string())
            }
        };
        true
    }

    /// Expands (loading page 1) or collapses the table. Collapsing abandons an
    /// in-flight page.
    pub fn toggle_table(&mut self, analysis_id: Option<u64>) -> Option<PageRequest> {
        if self.table_expanded {
            self.table_expanded = false;
            self.pending_page = None;
            return None;
        }
        self.begin_page(1, analysis_id)
    }

    pub fn next_page(&mut self, analysis_id: Option<u64>) -> Option<PageRequest> {
        if !self.cursor.has_next() {
            return None;
        }
        self.begin_page(self.cursor.current_page + 1, analysis_id)
    }

    pub fn previous_page(&mut self, analysis_id: Option<u64>) -> Option<PageRequest> {
        if !self.cursor.has_previous() {
            return None;
        }
        self.begin_page(self.cursor.current_page - 1, analysis_id)
    }

    /// Starts generating the analysis of the selected issue.
    pub fn begin_generation(
        &mut self,
        analysis_id: Option<u64>,
        total_rows: u64,
    ) -> Option<GenerationRequest> {
        let issue = self.active.as_ref()?.issue.clone();
        let token = self.issue_token();
        self.pending_generation = Some(token.request_id);
        self.generation = GenerationState::Generating;
        self.full_analysis_open = false;
        Some(GenerationRequest {
            token,
            analysis_id,
            issue,
            total_rows,
        })
    }

    /// Applies a generation outcome. Returns `false` when it was stale.
    pub fn finish_generation(
        &mut self,
        request: &GenerationRequest,
        outcome: Result<AnalysisSections, DashboardError>,
    ) -> bool {
        if !self.is_current(request.token, self.pending_generation) {
            log::warn!(
                "discarding stale analysis of {} ({})",
                request.issue.issue_type,
                request.issue.title()
            );
            return false;
        }
        self.pending_generation = None;

        self.generation = match outcome {
            Ok(sections) => {
                // without a summary the full analysis is the only content
                self.full_analysis_open = sections.summary.is_empty();
                GenerationState::Ready(sections)
            }
            Err(err) => {
                log::error!("analysis generation failed: {}", err);
                GenerationState::Failed(format!("Failed to generate analysis: {}", err))
            }
        };
        true
    }

    pub fn toggle_full_analysis(&mut self) {
        if matches!(self.generation, GenerationState::Ready(_)) {
            self.full_analysis_open = !self.full_analysis_open;
        }
    }
}

/// Asks the server for a markdown analysis of `issue` and splits it into
/// rendered sections.
pub async fn generate_ai_analysis(
    backend: &dyn Backend,
    request: &GenerationRequest,
    headers: &SectionHeaders,
    renderer: &MarkdownRenderer,
) -> Result<AnalysisSections, DashboardError> {
    let analysis_id = request
        .analysis_id
        .ok_or_else(|| DashboardError::Generation(MISSING_ANALYSIS_ID.to_string()))?;
    let issue = &request.issue;

    let body = GenerateIssueAnalysisRequest {
        issue_type: issue.issue_type.clone(),
        column: issue.column.clone(),
        severity: issue.severity.clone(),
        count: issue.count,
        percentage: (issue.percentage_of(request.total_rows) * 10.0).round() / 10.0,
        description: issue.description.clone(),
    };

    log::info!("generating analysis of {} in {}", issue.issue_type, issue.title());
    let response = backend
        .generate_issue_analysis(analysis_id, &body)
        .await
        .map_err(|err| DashboardError::Generation(err.into_message()))?;
    if !response.success {
        return Err(DashboardError::Generation(
            response
                .message
                .unwrap_or_else(|| "Failed to generate analysis".to_string()),
        ));
    }
    let markdown = response.analysis.ok_or_else(|| {
        DashboardError::Generation(
            FetchError::Decode("generation response without analysis".into()).to_string(),
        )
    })?;

    Ok(AnalysisSections::parse(&markdown, headers, renderer))
}
