//! [`Backend`] over `gloo-net`, talking to the analysis server.

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
use gloo_net::http::{Request, RequestBuilder, Response};
use presenter::{Backend, FetchError, UploadFile};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use std::rc::Rc;
use web_sys::FormData;

pub struct HttpBackend {
    api_base: String,
}

impl HttpBackend {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn network(err: gloo_net::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

/// Non-2xx answers become [`FetchError::Status`] carrying the server's
/// `message` when the body has one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;

    if !response.ok() {
        let message = serde_json::from_str::<MessageResponse>(&body)
            .ok()
            .and_then(|r| r.message)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        log::warn!("{} answered {}: {}", response.url(), status, message);
        return Err(FetchError::Status { status, message });
    }

    serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, FetchError> {
    let response = builder.send().await.map_err(network)?;
    decode(response).await
}

async fn send_request<T: DeserializeOwned>(request: Request) -> Result<T, FetchError> {
    let response = request.send().await.map_err(network)?;
    decode(response).await
}

fn multipart(file: &UploadFile) -> Result<FormData, FetchError> {
    let blob = gloo_file::Blob::new_with_options(file.bytes.as_slice(), file.mime_type.as_deref());
    let form = FormData::new().map_err(|err| FetchError::Network(format!("{:?}", err)))?;
    form.append_with_blob_and_filename("file", &web_sys::Blob::from(blob), &file.name)
        .map_err(|err| FetchError::Network(format!("{:?}", err)))?;
    Ok(form)
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn upload(&self, file: &UploadFile) -> Result<UploadResponse, FetchError> {
        let form = multipart(file)?;
        let request = Request::post(&self.url("/api/upload"))
            .body(form)
            .map_err(network)?;
        send_request(request).await
    }

    async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<DataResponse<AnalysisResult>, FetchError> {
        let request = Request::post(&self.url("/api/analyze"))
            .json(request)
            .map_err(network)?;
        send_request(request).await
    }

    async fn history(&self) -> Result<HistoryResponse, FetchError> {
        send(Request::get(&self.url("/api/history"))).await
    }

    async fn clear_history(&self) -> Result<MessageResponse, FetchError> {
        send(Request::delete(&self.url("/api/history"))).await
    }

    async fn result(&self, analysis_id: u64) -> Result<DataResponse<AnalysisResult>, FetchError> {
        send(Request::get(&self.url(&format!("/api/results/{}", analysis_id)))).await
    }

    async fn generate_issue_analysis(
        &self,
        analysis_id: u64,
        request: &GenerateIssueAnalysisRequest,
    ) -> Result<GenerateIssueAnalysisResponse, FetchError> {
        let path = format!("/api/analysis/{}/generate-issue-analysis", analysis_id);
        let request = Request::post(&self.url(&path))
            .json(request)
            .map_err(network)?;
        send_request(request).await
    }

    async fn affected_rows(
        &self,
        analysis_id: u64,
        query: &AffectedRowsQuery,
    ) -> Result<DataResponse<AffectedRowsPage>, FetchError> {
        let path = format!("/api/analysis/{}/affected-rows", analysis_id);
        send(Request::get(&self.url(&path)).query(query.to_pairs())).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, FetchError> {
        let request = Request::post(&self.url("/auth/login"))
            .json(request)
            .map_err(network)?;
        send_request(request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, FetchError> {
        let request = Request::post(&self.url("/auth/signup"))
            .json(request)
            .map_err(network)?;
        send_request(request).await
    }

    async fn logout(&self) -> Result<(), FetchError> {
        let response = Request::post(&self.url("/auth/logout"))
            .send()
            .await
            .map_err(network)?;
        if response.ok() {
            Ok(())
        } else {
            Err(FetchError::Status {
                status: response.status(),
                message: response.status_text(),
            })
        }
    }
}

/// Shared handle passed down as a component prop.
#[derive(Clone)]
pub struct BackendHandle(Rc<dyn Backend>);

impl BackendHandle {
    pub fn http(api_base: &str) -> Self {
        Self(Rc::new(HttpBackend::new(api_base)))
    }
}

impl PartialEq for BackendHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for BackendHandle {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
