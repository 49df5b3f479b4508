use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto, UpdateStatusDto};
use crate::features::reports::models::{ReportFilter, ReportStatus};

#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The request never reached the service (refused, DNS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("server responded with status {status}")]
    Server { status: u16 },

    /// The response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiClientError>;

/// Client-side view of the report service's REST surface
#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn list(&self, filter: &ReportFilter) -> ApiResult<Vec<ReportResponseDto>>;
    async fn create(&self, dto: &CreateReportDto) -> ApiResult<ReportResponseDto>;
    async fn update_status(&self, id: Uuid, status: ReportStatus) -> ApiResult<ReportResponseDto>;
    async fn export(&self, status: Option<ReportStatus>) -> ApiResult<Vec<u8>>;
}

/// reqwest-backed implementation talking to a running service
pub struct HttpReportsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Query pairs for a filtered list; unset filters are omitted entirely
    /// rather than sent as empty strings.
    fn filter_params(filter: &ReportFilter) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = filter.status {
            params.push(("status", status.to_string()));
        }
        if let Some(date) = filter.start_date {
            params.push(("startDate", date.to_string()));
        }
        if let Some(date) = filter.end_date {
            params.push(("endDate", date.to_string()));
        }
        params
    }
}

fn network(e: reqwest::Error) -> ApiClientError {
    ApiClientError::Network(e.to_string())
}

fn decode(e: reqwest::Error) -> ApiClientError {
    ApiClientError::Decode(e.to_string())
}

fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiClientError::Server {
            status: response.status().as_u16(),
        })
    }
}

#[async_trait]
impl ReportsApi for HttpReportsApi {
    async fn list(&self, filter: &ReportFilter) -> ApiResult<Vec<ReportResponseDto>> {
        let response = self
            .client
            .get(format!("{}/reportes", self.base_url))
            .query(&Self::filter_params(filter))
            .send()
            .await
            .map_err(network)?;

        ensure_success(response)?.json().await.map_err(decode)
    }

    async fn create(&self, dto: &CreateReportDto) -> ApiResult<ReportResponseDto> {
        let response = self
            .client
            .post(format!("{}/reportes", self.base_url))
            .json(dto)
            .send()
            .await
            .map_err(network)?;

        ensure_success(response)?.json().await.map_err(decode)
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> ApiResult<ReportResponseDto> {
        let response = self
            .client
            .patch(format!("{}/reportes/{}", self.base_url, id))
            .json(&UpdateStatusDto { status })
            .send()
            .await
            .map_err(network)?;

        ensure_success(response)?.json().await.map_err(decode)
    }

    async fn export(&self, status: Option<ReportStatus>) -> ApiResult<Vec<u8>> {
        let mut request = self
            .client
            .get(format!("{}/reportes/export", self.base_url));
        if let Some(status) = status {
            request = request.query(&[("status", status.to_string())]);
        }

        let response = request.send().await.map_err(network)?;
        let bytes = ensure_success(response)?.bytes().await.map_err(network)?;
        Ok(bytes.to_vec())
    }
}
