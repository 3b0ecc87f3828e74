//! The dashboard controller: the current analysis, its view model, the issue
//! detail panel, the history list and the upload progress.


use crate::analysis_view::AnalysisView;
use crate::backend::export_path;
use crate::config::DashboardConfig;
use crate::detail::{GenerationRequest, IssueDetailStore, PageRequest};
use crate::error::DashboardError;
use crate::history::HistoryStore;
use crate::markdown::MarkdownRenderer;
use crate::sections::AnalysisSections;
use crate::upload::{self, UploadStage};
use common::model::affected_rows::AffectedRowsPage;
use common::model::analysis::AnalysisResult;

/// A stored analysis to load from the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRequest {
    request_id: u64,
    pub analysis_id: u64,
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    renderer: MarkdownRenderer,
    result: Option<AnalysisResult>,
    view: Option<AnalysisView>,
    detail: IssueDetailStore,
    history: HistoryStore,
    upload: UploadStage,
    next_request: u64,
    pending_result: Option<u64>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            detail: IssueDetailStore::new(config.page_size),
            config,
            renderer: MarkdownRenderer::new(),
            result: None,
            view: None,
            history: HistoryStore::default(),
            upload: UploadStage::Idle,
            next_request: 0,
            pending_result: None,
        }
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn renderer(&self) -> MarkdownRenderer {
        self.renderer
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> Option<&AnalysisView> {
        self.view.as_ref()
    }

    pub fn detail(&self) -> &IssueDetailStore {
        &self.detail
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn upload_stage(&self) -> UploadStage {
        self.upload
    }

    fn analysis_id(&self) -> Option<u64> {
        self.result.as_ref().and_then(|r| r.analysis_id)
    }

    fn total_rows(&self) -> u64 {
        self.result.as_ref().map_or(0, |r| r.total_rows)
    }

    /// Replaces the current analysis. Closes the detail panel and abandons a
    /// pending history load.
    pub fn show_result(&mut self, result: AnalysisResult) {
        self.detail.close();
        self.pending_result = None;
        self.view = Some(AnalysisView::render(&result, &self.config));
        self.result = Some(result);
    }

    /// Drops the current analysis, as when the user removes the uploaded file.
    pub fn clear_result(&mut self) {
        self.detail.close();
        self.result = None;
        self.view = None;
        self.upload = UploadStage::Idle;
    }

    /// Validates a picked file and shows the upload stage.
    pub fn begin_upload(&mut self, size: u64) -> Result<(), DashboardError> {
        upload::validate_size(size, &self.config)?;
        self.upload = UploadStage::Uploading;
        Ok(())
    }

    /// Moves the progress bar on once the upload settled.
    pub fn upload_finished(&mut self, outcome: &Result<String, DashboardError>) {
        self.upload = match outcome {
            Ok(_) => UploadStage::Analyzing,
            Err(_) => UploadStage::Idle,
        };
    }

    pub fn analysis_finished(
        &mut self,
        outcome: Result<AnalysisResult, DashboardError>,
    ) -> Result<(), DashboardError> {
        match outcome {
            Ok(result) => {
                self.upload = UploadStage::Complete;
                self.show_result(result);
                Ok(())
            }
            Err(err) => {
                self.upload = UploadStage::Idle;
                Err(err)
            }
        }
    }

    /// Hides a completed progress bar.
    pub fn hide_progress(&mut self) {
        if self.upload == UploadStage::Complete {
            self.upload = UploadStage::Idle;
        }
    }

    pub fn begin_view_history(&mut self, analysis_id: u64) -> ResultRequest {
        self.next_request += 1;
        self.pending_result = Some(self.next_request);
        ResultRequest {
            request_id: self.next_request,
            analysis_id,
        }
    }

    /// Shows a loaded history item. `Ok(false)` means a newer load or a new
    /// analysis superseded this one.
    pub fn finish_view_history(
        &mut self,
        request: &ResultRequest,
        outcome: Result<AnalysisResult, DashboardError>,
    ) -> Result<bool, DashboardError> {
        if self.pending_result != Some(request.request_id) {
            log::warn!("discarding stale load of analysis {}", request.analysis_id);
            return Ok(false);
        }
        self.pending_result = None;
        self.show_result(outcome?);
        Ok(true)
    }

    /// Opens the detail panel on issue `index`. Out-of-range indices and a
    /// missing analysis are ignored.
    pub fn select_issue(&mut self, index: usize) -> bool {
        let Some(result) = &self.result else {
            return false;
        };
        let Some(issue) = result.issues.get(index) else {
            log::warn!("no issue at index {}", index);
            return false;
        };
        self.detail.select(index, issue, result.total_rows);
        true
    }

    pub fn close_issue(&mut self) {
        self.detail.close();
    }

    pub fn toggle_affected_rows(&mut self) -> Option<PageRequest> {
        let analysis_id = self.analysis_id();
        self.detail.toggle_table(analysis_id)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        let analysis_id = self.analysis_id();
        self.detail.next_page(analysis_id)
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        let analysis_id = self.analysis_id();
        self.detail.previous_page(analysis_id)
    }

    pub fn finish_page(
        &mut self,
        request: &PageRequest,
        outcome: Result<AffectedRowsPage, DashboardError>,
    ) -> bool {
        self.detail.finish_page(request, outcome)
    }

    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        let analysis_id = self.analysis_id();
        let total_rows = self.total_rows();
        self.detail.begin_generation(analysis_id, total_rows)
    }

    pub fn finish_generation(
        &mut self,
        request: &GenerationRequest,
        outcome: Result<AnalysisSections, DashboardError>,
    ) -> bool {
        self.detail.finish_generation(request, outcome)
    }

    pub fn toggle_full_analysis(&mut self) {
        self.detail.toggle_full_analysis();
    }

    /// Download URL of the current analysis report.
    pub fn export_url(&self) -> Result<String, DashboardError> {
        let analysis_id = self.analysis_id().ok_or(DashboardError::NoAnalysis)?;
        Ok(self.config.url(&export_path(analysis_id)))
    }
}
