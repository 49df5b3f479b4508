mod pg_store;

pub use pg_store::PgReportStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, Report, ReportFilter, ReportStatus};

/// Persistence seam for reports. The production implementation is Postgres;
/// tests use an in-memory store with the same contract.
///
/// Contract: `find` returns the full matching set sorted by `submitted_at`
/// descending; `update_status` returns `None` for an unknown id; single-row
/// writes are atomic (delegated to the store, no cross-row invariants exist).
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a new report. The store assigns `id`, `submitted_at`, and the
    /// initial `Pending` status.
    async fn insert(&self, new: NewReport) -> Result<Report>;

    /// Fetch every report matching the filter, newest first.
    async fn find(&self, filter: &ReportFilter) -> Result<Vec<Report>>;

    /// Overwrite the status of the identified report, returning the updated
    /// row, or `None` when no such report exists.
    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>>;
}
