mod report;

pub use report::{NewReport, Report, ReportFilter, ReportStatus};
