use std::sync::Arc;

use uuid::Uuid;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{ReportFilter, ReportStatus};
use crate::flows::api_client::{ApiClientError, ReportsApi};
use crate::shared::constants::{ADMIN_MAP_CENTER, ITEMS_PER_PAGE};
use crate::shared::types::LatLng;

/// Everything the dashboard renders from
#[derive(Debug)]
pub struct ReviewState {
    pub reports: Vec<ReportResponseDto>,
    pub loading: bool,
    /// Current page, 1-indexed
    pub page: usize,
    pub selected: Option<ReportResponseDto>,
    /// Status filter in effect, forwarded to the export endpoint
    pub status_filter: Option<ReportStatus>,
    /// Where the map starts before any markers are placed
    pub map_center: LatLng,
    fetch_generation: u64,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            loading: false,
            page: 1,
            selected: None,
            status_filter: None,
            map_center: ADMIN_MAP_CENTER,
            fetch_generation: 0,
        }
    }
}

/// Accompanies one in-flight list request; superseded tickets are discarded
/// so a slow response cannot overwrite a newer one.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
}

/// Administrative review flow: filtered listing, client-side pagination,
/// detail view with resolve, map markers, and CSV export.
pub struct ReviewFlow {
    api: Arc<dyn ReportsApi>,
    state: ReviewState,
}

impl ReviewFlow {
    pub fn new(api: Arc<dyn ReportsApi>) -> Self {
        Self {
            api,
            state: ReviewState::default(),
        }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Mark a fetch as started. The returned ticket must accompany the
    /// response when it lands.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state.loading = true;
        self.state.fetch_generation += 1;
        FetchTicket {
            generation: self.state.fetch_generation,
        }
    }

    /// Apply a landed response. Responses from superseded fetches are
    /// dropped; errors leave the previous set in place.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<ReportResponseDto>, ApiClientError>,
    ) {
        if ticket.generation != self.state.fetch_generation {
            tracing::debug!(
                "Discarding stale list response (generation {})",
                ticket.generation
            );
            return;
        }

        self.state.loading = false;
        match outcome {
            Ok(reports) => self.state.reports = reports,
            Err(e) => tracing::error!("Error fetching reports: {}", e),
        }
    }

    /// Fetch with the given filter, replacing the in-memory set.
    pub async fn apply_filter(&mut self, filter: ReportFilter) {
        self.state.status_filter = filter.status;
        let ticket = self.begin_fetch();
        let api = Arc::clone(&self.api);
        let outcome = api.list(&filter).await;
        self.complete_fetch(ticket, outcome);
    }

    /// Initial and post-resolve fetch: unfiltered, dropping any active
    /// filter.
    pub async fn refresh(&mut self) {
        self.apply_filter(ReportFilter::default()).await;
    }

    pub fn total_pages(&self) -> usize {
        self.state.reports.len().div_ceil(ITEMS_PER_PAGE)
    }

    /// Change page; requests outside `[1, total_pages]` are ignored.
    pub fn set_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.state.page = page;
        }
    }

    /// The slice of the in-memory set shown on the current page.
    pub fn page_items(&self) -> &[ReportResponseDto] {
        let start = (self.state.page - 1) * ITEMS_PER_PAGE;
        if start >= self.state.reports.len() {
            return &[];
        }
        let end = (start + ITEMS_PER_PAGE).min(self.state.reports.len());
        &self.state.reports[start..end]
    }

    /// Open the detail view for a report in the current set.
    pub fn select(&mut self, id: Uuid) {
        self.state.selected = self.state.reports.iter().find(|r| r.id == id).cloned();
    }

    pub fn close_detail(&mut self) {
        self.state.selected = None;
    }

    /// Mark a report resolved, then re-fetch everything unfiltered so the
    /// table and map agree with the store.
    pub async fn resolve(&mut self, id: Uuid) {
        let api = Arc::clone(&self.api);
        let outcome = api.update_status(id, ReportStatus::Resolved).await;
        match outcome {
            Ok(_) => {
                self.state.selected = None;
                self.refresh().await;
            }
            Err(e) => tracing::error!("Error resolving report: {}", e),
        }
    }

    /// Marker positions for every report in the in-memory set, independent
    /// of pagination. Malformed coordinates are skipped, never an error.
    pub fn map_markers(&self) -> Vec<(Uuid, LatLng)> {
        self.state
            .reports
            .iter()
            .filter_map(|report| {
                let position = LatLng::new(report.latitude, report.longitude);
                if position.is_well_formed() {
                    Some((report.id, position))
                } else {
                    tracing::warn!("Skipping report {} with malformed coordinates", report.id);
                    None
                }
            })
            .collect()
    }

    /// CSV download honoring the current status filter only.
    pub async fn export(&self) -> Result<Vec<u8>, ApiClientError> {
        self.api.export(self.state.status_filter).await
    }
}
