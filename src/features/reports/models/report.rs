use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report status enum matching database enum.
///
/// Values are capitalized because they travel on the wire as-is
/// ("Pending" / "Resolved").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pending"),
            ReportStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReportStatus::Pending),
            "Resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("Invalid status: '{}'", other)),
        }
    }
}

/// Database model for a citizen water-leak report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
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

/// Fields persisted on creation. The store assigns `id`, `submitted_at`,
/// and the initial `Pending` status.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter_name: String,
    pub address: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Optional constraints applied to a List read. Export only honors `status`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn by_status(status: Option<ReportStatus>) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Lower bound on `submitted_at`: midnight UTC of the start date.
    pub fn submitted_after(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Exclusive upper bound on `submitted_at`: midnight UTC of the day
    /// after the end date, so the whole end day is included.
    pub fn submitted_before(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }
}
