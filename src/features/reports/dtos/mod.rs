mod report_dto;

pub use report_dto::{
    CreateReportDto, ExportReportsQuery, ListReportsQuery, ReportResponseDto, UpdateStatusDto,
};
