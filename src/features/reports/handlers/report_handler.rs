use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, ErrorBody, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CreateReportDto, ExportReportsQuery, ListReportsQuery, ReportResponseDto, UpdateStatusDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::constants::EXPORT_FILENAME;

/// List reports, optionally filtered by status and submission date range.
///
/// Returns the full matching set sorted by submission time descending;
/// pagination is a client concern.
#[utoipa::path(
    get,
    path = "/reportes",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Matching reports, newest first", body = Vec<ReportResponseDto>),
        (status = 400, description = "Unparseable filter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "reportes"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let filter = query.to_filter()?;
    let reports = service.list(filter).await?;
    Ok(Json(reports))
}

/// Export reports as a CSV attachment. Status filter only.
#[utoipa::path(
    get,
    path = "/reportes/export",
    params(ExportReportsQuery),
    responses(
        (status = 200, description = "CSV attachment reportes.csv", content_type = "text/csv"),
        (status = 400, description = "Unparseable filter", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "reportes"
)]
pub async fn export_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<ExportReportsQuery>,
) -> Result<Response> {
    let csv = service.export_csv(query.to_status()?).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::Internal(format!("Failed to build export response: {}", e)))
}

/// Submit a new leak report.
#[utoipa::path(
    post,
    path = "/reportes",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created with Pending status", body = ReportResponseDto),
        (status = 400, description = "Missing coordinates or blank required field", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "reportes"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Update the status of an existing report.
#[utoipa::path(
    patch,
    path = "/reportes/{id}",
    params(("id" = Uuid, Path, description = "Report identifier")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated report", body = ReportResponseDto),
        (status = 404, description = "Unknown report id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "reportes"
)]
pub async fn update_report_status(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ReportResponseDto>> {
    let report = service.update_status(id, dto.status).await?;
    Ok(Json(report))
}
