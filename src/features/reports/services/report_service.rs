use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::models::{NewReport, ReportFilter, ReportStatus};
use crate::features::reports::store::ReportStore;

/// Column order is part of the export contract.
const CSV_HEADER: &str = "nombre,direccion,descripcion,fecha,status";

/// Service for report operations: filtered listing, creation, status
/// transitions, and CSV export.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Full matching set, newest first. No server-side pagination; the
    /// dashboard paginates in memory.
    pub async fn list(&self, filter: ReportFilter) -> Result<Vec<ReportResponseDto>> {
        let reports = self.store.find(&filter).await?;
        Ok(reports.into_iter().map(Into::into).collect())
    }

    /// Persist a new report with `Pending` status and a fresh id.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let latitude = dto
            .latitude
            .ok_or_else(|| AppError::Validation(COORDS_REQUIRED.to_string()))?;
        let longitude = dto
            .longitude
            .ok_or_else(|| AppError::Validation(COORDS_REQUIRED.to_string()))?;

        // Required text fields must survive trimming
        for (field, value) in [
            ("reporterName", &dto.reporter_name),
            ("address", &dto.address),
            ("description", &dto.description),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} must not be empty", field)));
            }
        }

        let report = self
            .store
            .insert(NewReport {
                reporter_name: dto.reporter_name,
                address: dto.address,
                description: dto.description,
                photo_url: dto.photo_url,
                latitude,
                longitude,
            })
            .await?;

        tracing::info!("Report created: id={}", report.id);

        Ok(report.into())
    }

    /// Overwrite the status of an existing report. Unknown ids are an
    /// explicit NotFound rather than a silent success.
    pub async fn update_status(&self, id: Uuid, status: ReportStatus) -> Result<ReportResponseDto> {
        let updated = self
            .store
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report '{}' not found", id)))?;

        tracing::info!("Report status updated: id={}, status={}", id, status);

        Ok(updated.into())
    }

    /// Serialize the status-filtered set as CSV. Date filters are not
    /// supported for export.
    pub async fn export_csv(&self, status: Option<ReportStatus>) -> Result<String> {
        let reports = self.store.find(&ReportFilter::by_status(status)).await?;

        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for report in &reports {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                csv_escape(&report.reporter_name),
                csv_escape(&report.address),
                csv_escape(&report.description),
                report.submitted_at.to_rfc3339(),
                report.status,
            ));
        }

        Ok(csv)
    }
}

const COORDS_REQUIRED: &str = "Latitude and Longitude are required.";

/// Escape a value for CSV: wrap in quotes if it contains the delimiter, a
/// quote, or a line break; internal quotes are doubled.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{new_report_dto, InMemoryReportStore};

    fn service_with_store() -> (ReportService, Arc<InMemoryReportStore>) {
        let store = Arc::new(InMemoryReportStore::default());
        (ReportService::new(store.clone()), store)
    }

    #[test]
    fn escape_passes_plain_values_through() {
        assert_eq!(csv_escape("Fuga grande"), "Fuga grande");
    }

    #[test]
    fn escape_quotes_delimiters_and_doubles_quotes() {
        assert_eq!(csv_escape("Calle 1, Centro"), "\"Calle 1, Centro\"");
        assert_eq!(csv_escape("tubo \"roto\""), "\"tubo \"\"roto\"\"\"");
        assert_eq!(csv_escape("linea1\nlinea2"), "\"linea1\nlinea2\"");
    }

    #[tokio::test]
    async fn create_assigns_pending_status_and_an_id() {
        let (service, _) = service_with_store();

        let report = service.create(new_report_dto("Ana")).await.unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.reporter_name, "Ana");
        assert!(!report.id.is_nil());
    }

    #[tokio::test]
    async fn create_without_latitude_persists_nothing() {
        let (service, store) = service_with_store();

        let mut dto = new_report_dto("Ana");
        dto.latitude = None;
        let err = service.create(dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.find(&ReportFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_accepts_zero_coordinates() {
        // 0.0 is a legitimate equatorial / prime-meridian coordinate
        let (service, _) = service_with_store();

        let mut dto = new_report_dto("Ana");
        dto.latitude = Some(0.0);
        dto.longitude = Some(0.0);
        let report = service.create(dto).await.unwrap();

        assert_eq!(report.latitude, 0.0);
        assert_eq!(report.longitude, 0.0);
    }

    #[tokio::test]
    async fn create_rejects_whitespace_only_description() {
        let (service, _) = service_with_store();

        let mut dto = new_report_dto("Ana");
        dto.description = "   ".to_string();
        let err = service.create(dto).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_status_changes_only_the_status() {
        let (service, _) = service_with_store();
        let created = service.create(new_report_dto("Ana")).await.unwrap();

        let updated = service
            .update_status(created.id, ReportStatus::Resolved)
            .await
            .unwrap();

        assert_eq!(updated.status, ReportStatus::Resolved);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.reporter_name, created.reporter_name);
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.submitted_at, created.submitted_at);
        assert_eq!(updated.latitude, created.latitude);
        assert_eq!(updated.longitude, created.longitude);
    }

    #[tokio::test]
    async fn update_status_on_unknown_id_is_not_found() {
        let (service, _) = service_with_store();

        let err = service
            .update_status(Uuid::new_v4(), ReportStatus::Resolved)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_with_status_filter_returns_only_matches() {
        let (service, _) = service_with_store();
        for name in ["a", "b", "c"] {
            service.create(new_report_dto(name)).await.unwrap();
        }
        let resolved_one = service.create(new_report_dto("d")).await.unwrap();
        let resolved_two = service.create(new_report_dto("e")).await.unwrap();
        for id in [resolved_one.id, resolved_two.id] {
            service.update_status(id, ReportStatus::Resolved).await.unwrap();
        }

        let resolved = service
            .list(ReportFilter::by_status(Some(ReportStatus::Resolved)))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|r| r.status == ReportStatus::Resolved));
    }

    #[tokio::test]
    async fn export_header_and_rows_follow_the_contract() {
        let (service, _) = service_with_store();
        let mut dto = new_report_dto("Ana");
        dto.address = "Calle 1, Centro".to_string();
        dto.description = "Fuga \"grande\"".to_string();
        service.create(dto).await.unwrap();

        let csv = service.export_csv(None).await.unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("nombre,direccion,descripcion,fecha,status"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Ana,\"Calle 1, Centro\",\"Fuga \"\"grande\"\"\","));
        assert!(row.ends_with(",Pending"));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn export_honors_the_status_filter() {
        let (service, _) = service_with_store();
        service.create(new_report_dto("pendiente")).await.unwrap();
        let resolved = service.create(new_report_dto("resuelto")).await.unwrap();
        service
            .update_status(resolved.id, ReportStatus::Resolved)
            .await
            .unwrap();

        let csv = service
            .export_csv(Some(ReportStatus::Resolved))
            .await
            .unwrap();

        assert_eq!(csv.lines().count(), 2); // header + one row
        assert!(csv.contains("resuelto"));
        assert!(!csv.contains("pendiente"));
    }
}
