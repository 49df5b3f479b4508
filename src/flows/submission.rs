use std::sync::Arc;

use crate::features::reports::dtos::CreateReportDto;
use crate::flows::api_client::{ApiClientError, ReportsApi};
use crate::flows::location::LocationProvider;
use crate::modules::geocoding::ReverseGeocoder;
use crate::shared::constants::{
    DEFAULT_USER_LOCATION, MSG_CONNECTION_ERROR, MSG_SELECT_LOCATION, MSG_SUBMIT_FAILED,
    MSG_SUBMIT_SUCCESS,
};
use crate::shared::types::LatLng;

/// The report being typed in. Coordinates stay unset until geolocation
/// succeeds or the user taps the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftReport {
    pub reporter_name: String,
    pub address: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl DraftReport {
    fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Everything the submission surface renders from
#[derive(Debug, Clone)]
pub struct SubmissionState {
    pub draft: DraftReport,
    pub user_location: LatLng,
    pub message: Option<String>,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self {
            draft: DraftReport::default(),
            user_location: DEFAULT_USER_LOCATION,
            message: None,
        }
    }
}

/// Citizen submission flow: acquire a location, prefill the address, and
/// submit the draft.
pub struct SubmissionFlow {
    api: Arc<dyn ReportsApi>,
    geocoder: Arc<dyn ReverseGeocoder>,
    state: SubmissionState,
}

impl SubmissionFlow {
    pub fn new(api: Arc<dyn ReportsApi>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            api,
            geocoder,
            state: SubmissionState::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// One-shot geolocation on mount. Denial or unavailability keeps the
    /// default reference location and leaves the address blank for manual
    /// entry.
    pub async fn start(&mut self, locator: &dyn LocationProvider) {
        match locator.current_position().await {
            Ok(position) => {
                self.state.user_location = position;
                self.state.draft.latitude = Some(position.lat);
                self.state.draft.longitude = Some(position.lon);
                self.prefill_address(position.lat, position.lon).await;
            }
            Err(e) => {
                tracing::warn!("Could not detect location: {}", e);
            }
        }
    }

    /// Map tap: overrides any geolocation-derived coordinates and refreshes
    /// the address suggestion.
    pub async fn select_location(&mut self, lat: f64, lon: f64) {
        self.state.draft.latitude = Some(lat);
        self.state.draft.longitude = Some(lon);
        self.prefill_address(lat, lon).await;
    }

    async fn prefill_address(&mut self, lat: f64, lon: f64) {
        let geocoder = Arc::clone(&self.geocoder);
        let outcome = geocoder.reverse(lat, lon).await;
        match outcome {
            Ok(Some(address)) => self.state.draft.address = address,
            Ok(None) => {}
            // Swallowed: the address stays whatever it was, still editable
            Err(e) => tracing::warn!("Reverse geocoding failed: {}", e),
        }
    }

    pub fn set_reporter_name(&mut self, value: impl Into<String>) {
        self.state.draft.reporter_name = value.into();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.state.draft.address = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.state.draft.description = value.into();
    }

    /// Send the draft. Returns true when the service accepted it; in every
    /// other case the entered data is preserved for resubmission.
    pub async fn submit(&mut self) -> bool {
        if !self.state.draft.has_coordinates() {
            self.state.message = Some(MSG_SELECT_LOCATION.to_string());
            return false;
        }

        let dto = CreateReportDto {
            reporter_name: self.state.draft.reporter_name.clone(),
            address: self.state.draft.address.clone(),
            description: self.state.draft.description.clone(),
            latitude: self.state.draft.latitude,
            longitude: self.state.draft.longitude,
            photo_url: None,
        };

        let api = Arc::clone(&self.api);
        let outcome = api.create(&dto).await;
        match outcome {
            Ok(created) => {
                tracing::info!("Report submitted: id={}", created.id);
                self.state.message = Some(MSG_SUBMIT_SUCCESS.to_string());
                self.state.draft = DraftReport::default();
                true
            }
            Err(ApiClientError::Network(e)) => {
                tracing::error!("Network error submitting report: {}", e);
                self.state.message = Some(MSG_CONNECTION_ERROR.to_string());
                false
            }
            Err(e) => {
                tracing::error!("Report submission rejected: {}", e);
                self.state.message = Some(MSG_SUBMIT_FAILED.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{AppError, Result};
    use crate::flows::location::LocationError;
    use crate::shared::test_helpers::{StubMode, StubReportsApi};
    use async_trait::async_trait;

    struct StubGeocoder {
        answer: Result<Option<String>>,
    }

    impl StubGeocoder {
        fn with_address(address: &str) -> Self {
            Self {
                answer: Ok(Some(address.to_string())),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err(AppError::ExternalService("boom".to_string())),
            }
        }
    }

    #[async_trait]
    impl ReverseGeocoder for StubGeocoder {
        async fn reverse(&self, _lat: f64, _lon: f64) -> Result<Option<String>> {
            match &self.answer {
                Ok(value) => Ok(value.clone()),
                Err(_) => Err(AppError::ExternalService("boom".to_string())),
            }
        }
    }

    struct StubLocator {
        position: Option<LatLng>,
    }

    #[async_trait]
    impl LocationProvider for StubLocator {
        async fn current_position(&self) -> std::result::Result<LatLng, LocationError> {
            self.position.ok_or(LocationError::Denied)
        }
    }

    fn flow_with(api: Arc<StubReportsApi>, geocoder: StubGeocoder) -> SubmissionFlow {
        SubmissionFlow::new(api, Arc::new(geocoder))
    }

    fn filled_flow(api: Arc<StubReportsApi>) -> SubmissionFlow {
        let mut flow = flow_with(api, StubGeocoder::with_address("ignored"));
        flow.set_reporter_name("Ana");
        flow.set_address("Calle 1");
        flow.set_description("Fuga grande");
        flow
    }

    #[tokio::test]
    async fn geolocation_seeds_coordinates_and_prefills_address() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = flow_with(api, StubGeocoder::with_address("Av. Siempre Viva 742"));
        let locator = StubLocator {
            position: Some(LatLng::new(21.9, -102.3)),
        };

        flow.start(&locator).await;

        let state = flow.state();
        assert_eq!(state.user_location, LatLng::new(21.9, -102.3));
        assert_eq!(state.draft.latitude, Some(21.9));
        assert_eq!(state.draft.longitude, Some(-102.3));
        assert_eq!(state.draft.address, "Av. Siempre Viva 742");
    }

    #[tokio::test]
    async fn denied_geolocation_keeps_the_default_location() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = flow_with(api, StubGeocoder::with_address("unused"));
        let locator = StubLocator { position: None };

        flow.start(&locator).await;

        let state = flow.state();
        assert_eq!(state.user_location, DEFAULT_USER_LOCATION);
        assert_eq!(state.draft.latitude, None);
        assert_eq!(state.draft.address, "");
    }

    #[tokio::test]
    async fn map_tap_overrides_coordinates_and_regeocode() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = flow_with(api, StubGeocoder::with_address("Calle Nueva 5"));
        let locator = StubLocator {
            position: Some(LatLng::new(21.9, -102.3)),
        };
        flow.start(&locator).await;

        flow.select_location(19.43, -99.13).await;

        let state = flow.state();
        assert_eq!(state.draft.latitude, Some(19.43));
        assert_eq!(state.draft.longitude, Some(-99.13));
        assert_eq!(state.draft.address, "Calle Nueva 5");
    }

    #[tokio::test]
    async fn geocoding_failure_keeps_the_existing_address() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = flow_with(api, StubGeocoder::failing());
        flow.set_address("escrita a mano");

        flow.select_location(19.43, -99.13).await;

        assert_eq!(flow.state().draft.address, "escrita a mano");
        assert_eq!(flow.state().draft.latitude, Some(19.43));
    }

    #[tokio::test]
    async fn submit_is_blocked_without_coordinates() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = flow_with(api.clone(), StubGeocoder::with_address("unused"));
        flow.set_reporter_name("Ana");
        flow.set_description("Fuga grande");

        assert!(!flow.submit().await);

        assert_eq!(flow.state().message.as_deref(), Some(MSG_SELECT_LOCATION));
        assert!(api.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_submit_resets_the_form() {
        let api = Arc::new(StubReportsApi::new());
        let mut flow = filled_flow(api.clone());
        flow.select_location(21.88, -102.29).await;

        assert!(flow.submit().await);

        assert_eq!(flow.state().message.as_deref(), Some(MSG_SUBMIT_SUCCESS));
        assert_eq!(flow.state().draft, DraftReport::default());
        assert_eq!(api.reports.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn network_failure_preserves_the_draft() {
        let api = Arc::new(StubReportsApi::new());
        api.set_mode(StubMode::NetworkError);
        let mut flow = filled_flow(api.clone());
        flow.select_location(21.88, -102.29).await;

        assert!(!flow.submit().await);

        assert_eq!(flow.state().message.as_deref(), Some(MSG_CONNECTION_ERROR));
        assert_eq!(flow.state().draft.reporter_name, "Ana");
        assert_eq!(flow.state().draft.description, "Fuga grande");
        assert_eq!(flow.state().draft.latitude, Some(21.88));
    }

    #[tokio::test]
    async fn server_failure_preserves_the_draft_with_a_generic_message() {
        let api = Arc::new(StubReportsApi::new());
        api.set_mode(StubMode::ServerError);
        let mut flow = filled_flow(api.clone());
        flow.select_location(21.88, -102.29).await;

        assert!(!flow.submit().await);

        assert_eq!(flow.state().message.as_deref(), Some(MSG_SUBMIT_FAILED));
        assert_eq!(flow.state().draft.reporter_name, "Ana");
    }
}
