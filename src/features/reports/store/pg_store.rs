use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportFilter, ReportStatus};
use crate::features::reports::store::ReportStore;

const REPORT_COLUMNS: &str =
    "id, reporter_name, address, description, submitted_at, photo_url, status, latitude, longitude";

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the SELECT for a filtered read. Parameters are numbered in the
/// order the binds are applied: status, then lower bound, then upper bound.
fn build_find_query(filter: &ReportFilter) -> String {
    let mut conditions = Vec::new();
    let mut next_param = 1;

    if filter.status.is_some() {
        conditions.push(format!("status = ${}", next_param));
        next_param += 1;
    }
    if filter.submitted_after().is_some() {
        conditions.push(format!("submitted_at >= ${}", next_param));
        next_param += 1;
    }
    if filter.submitted_before().is_some() {
        conditions.push(format!("submitted_at < ${}", next_param));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {} ", conditions.join(" AND "))
    };

    format!(
        "SELECT {} FROM reportes {}ORDER BY submitted_at DESC",
        REPORT_COLUMNS, where_clause
    )
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, new: NewReport) -> Result<Report> {
        let query = format!(
            r#"
            INSERT INTO reportes (reporter_name, address, description, photo_url, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&new.reporter_name)
            .bind(&new.address)
            .bind(&new.description)
            .bind(&new.photo_url)
            .bind(new.latitude)
            .bind(new.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(report)
    }

    async fn find(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let query = build_find_query(filter);

        let mut q = sqlx::query_as::<_, Report>(&query);
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(after) = filter.submitted_after() {
            q = q.bind(after);
        }
        if let Some(before) = filter.submitted_before() {
            q = q.bind(before);
        }

        q.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to fetch reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<Option<Report>> {
        let query = format!(
            "UPDATE reportes SET status = $2 WHERE id = $1 RETURNING {}",
            REPORT_COLUMNS
        );

        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report status: {:?}", e);
                AppError::Database(e)
            })
    }
}
