#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::{DateTime, Utc};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
#[cfg(test)]
use crate::features::reports::models::{NewReport, Report, ReportFilter, ReportStatus};
#[cfg(test)]
use crate::features::reports::store::ReportStore;
#[cfg(test)]
use crate::flows::api_client::{ApiClientError, ReportsApi};

/// A well-formed create request; tests override individual fields.
#[cfg(test)]
pub fn new_report_dto(reporter_name: &str) -> CreateReportDto {
    CreateReportDto {
        reporter_name: reporter_name.to_string(),
        address: "Calle 1".to_string(),
        description: "Fuga grande".to_string(),
        latitude: Some(21.88),
        longitude: Some(-102.29),
        photo_url: None,
    }
}

/// A persisted report for seeding stores directly.
#[cfg(test)]
pub fn make_report(reporter_name: &str, submitted_at: DateTime<Utc>) -> Report {
    Report {
        id: Uuid::new_v4(),
        reporter_name: reporter_name.to_string(),
        address: "Calle 1".to_string(),
        description: "Fuga grande".to_string(),
        submitted_at,
        photo_url: None,
        status: ReportStatus::Pending,
        latitude: 21.88,
        longitude: -102.29,
    }
}

/// In-memory `ReportStore` implementing the same observable contract as the
/// Postgres store: filtered reads sorted newest-first, `None` on unknown ids.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryReportStore {
    rows: Mutex<Vec<Report>>,
}

#[cfg(test)]
impl InMemoryReportStore {
    pub fn seed(&self, report: Report) {
        self.rows.lock().unwrap().push(report);
    }
}

#[cfg(test)]
#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, new: NewReport) -> Result<Report> {
        let report = Report {
            id: Uuid::new_v4(),
            reporter_name: new.reporter_name,
            address: new.address,
            description: new.description,
            submitted_at: Utc::now(),
            photo_url: new.photo_url,
            status: ReportStatus::Pending,
            latitude: new.latitude,
            longitude: new.longitude,
        };
        self.rows.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn find(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let after = filter.submitted_after();
        let before = filter.submitted_before();

        let mut matches: Vec<Report> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| after.map_or(true, |bound| r.submitted_at >= bound))
            .filter(|r| before.map_or(true, |bound| r.submitted_at < bound))
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(matches)
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.status = status;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }
}

/// How the stub API answers its next calls.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StubMode {
    Ok,
    NetworkError,
    ServerError,
}

/// Scriptable `ReportsApi` for flow tests. Holds the "server" report set in
/// memory and records every list filter it was called with.
#[cfg(test)]
pub struct StubReportsApi {
    pub reports: Mutex<Vec<ReportResponseDto>>,
    pub mode: Mutex<StubMode>,
    pub list_calls: Mutex<Vec<ReportFilter>>,
    pub export_calls: Mutex<Vec<Option<ReportStatus>>>,
}

#[cfg(test)]
impl StubReportsApi {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            mode: Mutex::new(StubMode::Ok),
            list_calls: Mutex::new(Vec::new()),
            export_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reports(reports: Vec<ReportResponseDto>) -> Self {
        let api = Self::new();
        *api.reports.lock().unwrap() = reports;
        api
    }

    pub fn set_mode(&self, mode: StubMode) {
        *self.mode.lock().unwrap() = mode;
    }

    fn fail(&self) -> Option<ApiClientError> {
        match *self.mode.lock().unwrap() {
            StubMode::Ok => None,
            StubMode::NetworkError => Some(ApiClientError::Network("connection refused".into())),
            StubMode::ServerError => Some(ApiClientError::Server { status: 500 }),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ReportsApi for StubReportsApi {
    async fn list(
        &self,
        filter: &ReportFilter,
    ) -> std::result::Result<Vec<ReportResponseDto>, ApiClientError> {
        self.list_calls.lock().unwrap().push(*filter);
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(self.reports.lock().unwrap().clone())
    }

    async fn create(
        &self,
        dto: &CreateReportDto,
    ) -> std::result::Result<ReportResponseDto, ApiClientError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        let created = ReportResponseDto {
            id: Uuid::new_v4(),
            reporter_name: dto.reporter_name.clone(),
            address: dto.address.clone(),
            description: dto.description.clone(),
            submitted_at: Utc::now(),
            photo_url: dto.photo_url.clone(),
            status: ReportStatus::Pending,
            latitude: dto.latitude.unwrap_or_default(),
            longitude: dto.longitude.unwrap_or_default(),
        };
        self.reports.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
    ) -> std::result::Result<ReportResponseDto, ApiClientError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        let mut reports = self.reports.lock().unwrap();
        match reports.iter_mut().find(|r| r.id == id) {
            Some(report) => {
                report.status = status;
                Ok(report.clone())
            }
            None => Err(ApiClientError::Server { status: 404 }),
        }
    }

    async fn export(
        &self,
        status: Option<ReportStatus>,
    ) -> std::result::Result<Vec<u8>, ApiClientError> {
        self.export_calls.lock().unwrap().push(status);
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(b"nombre,direccion,descripcion,fecha,status\n".to_vec())
    }
}
