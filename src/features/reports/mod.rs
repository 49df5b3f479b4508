//! Citizen water-leak report feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/reportes` | List reports (status / date-range filters) |
//! | GET | `/reportes/export` | CSV export (status filter only) |
//! | POST | `/reportes` | Submit a new report |
//! | PATCH | `/reportes/{id}` | Update a report's status |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ReportService;
pub use store::{PgReportStore, ReportStore};
