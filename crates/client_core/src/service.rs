use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{AnalysisMeta, AnalysisResult},
    error::ErrorBody,
    protocol::{AnalyzeResponse, ANALYZE_PATH, DOWNLOAD_REPORT_PATH},
};
use tracing::{debug, info};
use url::Url;

use crate::{error::ServiceError, input::AnalysisRequest};

/// A successful analysis as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub meta: Option<AnalysisMeta>,
}

impl From<AnalysisResult> for AnalysisOutcome {
    fn from(result: AnalysisResult) -> Self {
        Self { result, meta: None }
    }
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, ServiceError>;
    async fn download_report(&self, result: &AnalysisResult) -> Result<Vec<u8>, ServiceError>;
}

pub struct HttpAnalysisService {
    http: Client,
    base_url: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Validates the service address and strips any trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(anyhow!("service url must not be empty"));
    }
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid service url `{raw}`"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "service url must use http or https, got `{}`",
            parsed.scheme()
        ));
    }
    Ok(trimmed.to_string())
}

async fn service_failure(response: Response) -> ServiceError {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error),
        Err(_) => None,
    };
    ServiceError::Service { status, message }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, ServiceError> {
        let mode = request.mode();
        let form = request.into_multipart()?;
        debug!(mode = mode.label(), "posting analysis request");

        let response = self
            .http
            .post(self.endpoint(ANALYZE_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Connectivity(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(service_failure(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Connectivity(e.to_string()))?;
        let parsed: AnalyzeResponse = serde_json::from_slice(&body)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        let (result, meta) = parsed
            .into_parts()
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        info!(score = result.score, verdict = %result.verdict, "analysis received");
        Ok(AnalysisOutcome { result, meta })
    }

    async fn download_report(&self, result: &AnalysisResult) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(DOWNLOAD_REPORT_PATH))
            .json(result)
            .send()
            .await
            .map_err(|e| ServiceError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(service_failure(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Connectivity(e.to_string()))?;
        debug!(size_bytes = bytes.len(), "report artifact received");
        Ok(bytes.to_vec())
    }
}
