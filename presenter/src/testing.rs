//! Scripted in-memory [`Backend`] for tests.

use crate::backend::{Backend, UploadFile};
use crate::error::FetchError;
use async_trait::async_trait;
use common::model::affected_rows::{AffectedRowsPage, Row, ROW_INDEX_COLUMN};
use common::model::analysis::AnalysisResult;
use common::model::history::HistoryEntry;
use common::requests::{
    AffectedRowsQuery, AnalyzeRequest, GenerateIssueAnalysisRequest, LoginRequest, SignupRequest,
};
use common::responses::{
    AuthResponse, DataResponse, GenerateIssueAnalysisResponse, HistoryResponse, MessageResponse,
    UploadResponse,
};
use std::cell::RefCell;

fn not_scripted<T>() -> Result<T, FetchError> {
    Err(FetchError::Network("not scripted".to_string()))
}

pub fn ok_data<T>(data: T) -> DataResponse<T> {
    DataResponse {
        success: true,
        data: Some(data),
        message: None,
    }
}

/// Records every call by name and answers from canned responses. Affected
/// rows are served from an in-memory row set with the server's paging rules.
pub struct FakeBackend {
    calls: RefCell<Vec<String>>,
    upload: Result<UploadResponse, FetchError>,
    analysis: Result<DataResponse<AnalysisResult>, FetchError>,
    history: RefCell<Vec<HistoryEntry>>,
    history_error: Option<FetchError>,
    clear: Result<MessageResponse, FetchError>,
    results: Vec<AnalysisResult>,
    generation: Result<GenerateIssueAnalysisResponse, FetchError>,
    rows: Vec<Row>,
    row_columns: Vec<String>,
    rows_error: Option<FetchError>,
    auth: Result<AuthResponse, FetchError>,
    generation_requests: RefCell<Vec<GenerateIssueAnalysisRequest>>,
    row_queries: RefCell<Vec<AffectedRowsQuery>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            upload: not_scripted(),
            analysis: not_scripted(),
            history: RefCell::new(Vec::new()),
            history_error: None,
            clear: not_scripted(),
            results: Vec::new(),
            generation: not_scripted(),
            rows: Vec::new(),
            row_columns: Vec::new(),
            rows_error: None,
            auth: not_scripted(),
            generation_requests: RefCell::new(Vec::new()),
            row_queries: RefCell::new(Vec::new()),
        }
    }

    /// Upload answers with `file_id`; analysis answers with `result`.
    pub fn with_analysis(mut self, file_id: &str, result: AnalysisResult) -> Self {
        self.upload = Ok(UploadResponse {
            success: true,
            file_id: Some(file_id.to_string()),
            filename: Some(result.filename.clone()),
            file_size: None,
            message: None,
        });
        self.analysis = Ok(ok_data(result));
        self
    }

    pub fn with_upload(mut self, upload: Result<UploadResponse, FetchError>) -> Self {
        self.upload = upload;
        self
    }

    pub fn with_history(self, entries: Vec<HistoryEntry>) -> Self {
        *self.history.borrow_mut() = entries;
        self
    }

    pub fn with_history_error(mut self, err: FetchError) -> Self {
        self.history_error = Some(err);
        self
    }

    /// A successful response also empties the stored history.
    pub fn with_clear(mut self, clear: Result<MessageResponse, FetchError>) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_result(mut self, result: AnalysisResult) -> Self {
        self.results.push(result);
        self
    }

    pub fn with_generation(mut self, generation: Result<GenerateIssueAnalysisResponse, FetchError>) -> Self {
        self.generation = generation;
        self
    }

    /// Rows served by the affected-rows endpoint, `row_index` excluded from
    /// `columns`.
    pub fn with_rows(mut self, columns: &[&str], rows: Vec<Row>) -> Self {
        self.row_columns = columns.iter().map(|c| c.to_string()).collect();
        self.rows = rows;
        self
    }

    pub fn with_rows_error(mut self, err: FetchError) -> Self {
        self.rows_error = Some(err);
        self
    }

    pub fn with_auth(mut self, auth: Result<AuthResponse, FetchError>) -> Self {
        self.auth = auth;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn generation_requests(&self) -> Vec<GenerateIssueAnalysisRequest> {
        self.generation_requests.borrow().clone()
    }

    pub fn row_queries(&self) -> Vec<AffectedRowsQuery> {
        self.row_queries.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn upload(&self, _file: &UploadFile) -> Result<UploadResponse, FetchError> {
        self.record("upload");
        self.upload.clone()
    }

    async fn analyze(
        &self,
        _request: &AnalyzeRequest,
    ) -> Result<DataResponse<AnalysisResult>, FetchError> {
        self.record("analyze");
        self.analysis.clone()
    }

    async fn history(&self) -> Result<HistoryResponse, FetchError> {
        self.record("history");
        if let Some(err) = &self.history_error {
            return Err(err.clone());
        }
        Ok(HistoryResponse {
            success: true,
            history: self.history.borrow().clone(),
        })
    }

    async fn clear_history(&self) -> Result<MessageResponse, FetchError> {
        self.record("clear_history");
        if matches!(&self.clear, Ok(response) if response.success) {
            self.history.borrow_mut().clear();
        }
        self.clear.clone()
    }

    async fn result(&self, analysis_id: u64) -> Result<DataResponse<AnalysisResult>, FetchError> {
        self.record("result");
        match self
            .results
            .iter()
            .find(|r| r.analysis_id == Some(analysis_id))
        {
            Some(result) => Ok(ok_data(result.clone())),
            None => Err(FetchError::Status {
                status: 404,
                message: "Analysis not found".to_string(),
            }),
        }
    }

    async fn generate_issue_analysis(
        &self,
        _analysis_id: u64,
        request: &GenerateIssueAnalysisRequest,
    ) -> Result<GenerateIssueAnalysisResponse, FetchError> {
        self.record("generate");
        self.generation_requests.borrow_mut().push(request.clone());
        self.generation.clone()
    }

    async fn affected_rows(
        &self,
        _analysis_id: u64,
        query: &AffectedRowsQuery,
    ) -> Result<DataResponse<AffectedRowsPage>, FetchError> {
        self.record("affected_rows");
        self.row_queries.borrow_mut().push(query.clone());
        if let Some(err) = &self.rows_error {
            return Err(err.clone());
        }

        let total = self.rows.len() as u64;
        let start = (query.offset as usize).min(self.rows.len());
        let end = (start + query.limit as usize).min(self.rows.len());
        let mut columns = vec![ROW_INDEX_COLUMN.to_string()];
        columns.extend(self.row_columns.iter().cloned());

        Ok(ok_data(AffectedRowsPage {
            rows: self.rows[start..end].to_vec(),
            columns,
            total_count: total,
            has_more: query.offset + u64::from(query.limit) < total,
            affected_column: query.column.clone(),
        }))
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, FetchError> {
        self.record("login");
        self.auth.clone()
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<AuthResponse, FetchError> {
        self.record("signup");
        self.auth.clone()
    }

    async fn logout(&self) -> Result<(), FetchError> {
        self.record("logout");
        Ok(())
    }
}
