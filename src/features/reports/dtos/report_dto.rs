use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Report, ReportFilter, ReportStatus};

/// Response DTO for a report. This is the wire shape for every read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub reporter_name: String,
    pub address: String,
    pub description: String,
    pub submitted_at: DateTime<Utc>,
    pub photo_url: Option<String>,
    pub status: ReportStatus,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            reporter_name: r.reporter_name,
            address: r.address,
            description: r.description,
            submitted_at: r.submitted_at,
            photo_url: r.photo_url,
            status: r.status,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Request DTO for submitting a new report.
///
/// Coordinates are `Option` so that "absent" is expressed by the type,
/// not by a sentinel; `0.0` is a valid coordinate. Presence is enforced
/// by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub reporter_name: String,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Request DTO for updating a report's status.
///
/// Any enum value is accepted; the forward-only Pending -> Resolved rule
/// is a review-flow concern, not a service one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub status: ReportStatus,
}

/// Query params for listing reports.
///
/// Raw strings rather than typed fields: the original client sends empty
/// strings for unset filters, which must read as "no constraint".
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// "Pending" or "Resolved"; empty or absent means all
    pub status: Option<String>,
    /// Inclusive lower bound, ISO calendar date (YYYY-MM-DD)
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, ISO calendar date (YYYY-MM-DD)
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl ListReportsQuery {
    pub fn to_filter(&self) -> Result<ReportFilter> {
        Ok(ReportFilter {
            status: parse_status(self.status.as_deref())?,
            start_date: parse_date(self.start_date.as_deref(), "startDate")?,
            end_date: parse_date(self.end_date.as_deref(), "endDate")?,
        })
    }
}

/// Query params for the CSV export. Date filters are deliberately not
/// supported here; the asymmetry with List is part of the contract.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExportReportsQuery {
    /// "Pending" or "Resolved"; empty or absent means all
    pub status: Option<String>,
}

impl ExportReportsQuery {
    pub fn to_status(&self) -> Result<Option<ReportStatus>> {
        parse_status(self.status.as_deref())
    }
}

fn parse_status(raw: Option<&str>) -> Result<Option<ReportStatus>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<ReportStatus>()
            .map(Some)
            .map_err(AppError::BadRequest),
    }
}

fn parse_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<NaiveDate>().map(Some).map_err(|_| {
            AppError::BadRequest(format!("Invalid {}: '{}' (expected YYYY-MM-DD)", field, value))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_builds_an_unconstrained_filter() {
        let query = ListReportsQuery::default();
        assert_eq!(query.to_filter().unwrap(), ReportFilter::default());
    }

    #[test]
    fn empty_strings_read_as_no_constraint() {
        // The original client sends status=&startDate=&endDate= for "all"
        let query = ListReportsQuery {
            status: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
        };
        assert_eq!(query.to_filter().unwrap(), ReportFilter::default());
    }

    #[test]
    fn populated_query_parses_into_typed_filter() {
        let query = ListReportsQuery {
            status: Some("Resolved".to_string()),
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-31".to_string()),
        };
        let filter = query.to_filter().unwrap();
        assert_eq!(filter.status, Some(ReportStatus::Resolved));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn invalid_status_or_date_is_a_bad_request() {
        let query = ListReportsQuery {
            status: Some("Closed".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.to_filter(),
            Err(AppError::BadRequest(_))
        ));

        let query = ListReportsQuery {
            start_date: Some("03/01/2024".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.to_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn create_dto_rejects_blank_required_fields() {
        let dto = CreateReportDto {
            reporter_name: String::new(),
            address: "Calle 1".to_string(),
            description: "Fuga grande".to_string(),
            latitude: Some(21.88),
            longitude: Some(-102.29),
            photo_url: None,
        };
        assert!(dto.validate().is_err());
    }
}
