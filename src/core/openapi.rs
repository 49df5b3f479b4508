use utoipa::OpenApi;

use crate::core::error::ErrorBody;
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        reports_handlers::list_reports,
        reports_handlers::export_reports,
        reports_handlers::create_report,
        reports_handlers::update_report_status,
    ),
    components(schemas(
        reports_dtos::ReportResponseDto,
        reports_dtos::CreateReportDto,
        reports_dtos::UpdateStatusDto,
        models::ReportStatus,
        ErrorBody,
    )),
    tags(
        (name = "reportes", description = "Citizen water-leak report endpoints")
    ),
    info(
        title = "AguaClara API",
        description = "REST API for citizen water-leak reporting",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
