//! The seam between the presentation logic and the analysis server.
//!
//! `frontend` implements [`Backend`] over `gloo-net`; tests use a scripted
//! fake. Implementations translate transport problems and non-2xx statuses
//! into [`FetchError`] and otherwise return the decoded envelope untouched:
//! interpreting `success: false` is the caller's job.

use crate::error::FetchError;
use async_trait::async_trait;
use common::model::affected_rows::AffectedRowsPage;
use common::model::analysis::AnalysisResult;
use common::requests::{
    AffectedRowsQuery, AnalyzeRequest, GenerateIssueAnalysisRequest, LoginRequest, SignupRequest,
};
use common::responses::{
    AuthResponse, DataResponse, GenerateIssueAnalysisResponse, HistoryResponse, MessageResponse,
    UploadResponse,
};

/// A file picked by the user, read into memory for the multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[async_trait(?Send)]
pub trait Backend {
    /// `POST /api/upload` (multipart, field `file`).
    async fn upload(&self, file: &UploadFile) -> Result<UploadResponse, FetchError>;

    /// `POST /api/analyze`.
    async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<DataResponse<AnalysisResult>, FetchError>;

    /// `GET /api/history`.
    async fn history(&self) -> Result<HistoryResponse, FetchError>;

    /// `DELETE /api/history`.
    async fn clear_history(&self) -> Result<MessageResponse, FetchError>;

    /// `GET /api/results/{id}`.
    async fn result(&self, analysis_id: u64) -> Result<DataResponse<AnalysisResult>, FetchError>;

    /// `POST /api/analysis/{id}/generate-issue-analysis`.
    async fn generate_issue_analysis(
        &self,
        analysis_id: u64,
        request: &GenerateIssueAnalysisRequest,
    ) -> Result<GenerateIssueAnalysisResponse, FetchError>;

    /// `GET /api/analysis/{id}/affected-rows`.
    async fn affected_rows(
        &self,
        analysis_id: u64,
        query: &AffectedRowsQuery,
    ) -> Result<DataResponse<AffectedRowsPage>, FetchError>;

    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, FetchError>;

    /// `POST /auth/signup`.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, FetchError>;

    /// `POST /auth/logout`.
    async fn logout(&self) -> Result<(), FetchError>;
}

/// Download path of the JSON report of an analysis (`GET /api/export/{id}`).
pub fn export_path(analysis_id: u64) -> String {
    format!("/api/export/{}", analysis_id)
}
