use common::model::analysis::AnalysisResult;
use common::model::affected_rows::AffectedRowsPage;
use common::model::history::HistoryEntry;
use presenter::dashboard::ResultRequest;
use presenter::detail::{GenerationRequest, PageRequest};
use presenter::history::{ClearOutcome, HistoryRequest};
use presenter::sections::AnalysisSections;
use presenter::DashboardError;

use super::state::ActiveView;

pub enum Msg {
    SetView(ActiveView),
    FilePicked(web_sys::File),
    FileRejected(String),
    UploadSettled(Result<String, DashboardError>),
    Analyzed(Result<AnalysisResult, DashboardError>),
    HideProgress,
    ClearUpload,
    Export,
    LoadHistory,
    HistoryLoaded(HistoryRequest, Vec<HistoryEntry>),
    ClearHistory,
    HistoryCleared(ClearOutcome),
    ViewHistory(u64),
    HistoryResultLoaded(ResultRequest, Result<AnalysisResult, DashboardError>),
    SelectIssue(usize),
    CloseIssue,
    ToggleAffectedRows,
    ScrollToRows,
    NextPage,
    PreviousPage,
    PageLoaded(PageRequest, Result<AffectedRowsPage, DashboardError>),
    GenerateAnalysis,
    AnalysisGenerated(GenerationRequest, Result<AnalysisSections, DashboardError>),
    ToggleFullAnalysis,
    Logout,
}
