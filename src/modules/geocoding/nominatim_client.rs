use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::modules::geocoding::ReverseGeocoder;

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Relevant slice of the Nominatim `/reverse` response
#[derive(Debug, Deserialize)]
struct NominatimReverseResponse {
    display_name: Option<String>,
}

/// Reverse geocoding client for Nominatim
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_BASE_URL)
    }

    /// Override the endpoint, used to point tests at a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("AguaClara/0.1 (citizen-leak-reports)")
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, lat, lon
        );

        tracing::debug!("Reverse geocoding: {}, {}", lat, lon);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalService(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let body: NominatimReverseResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Invalid Nominatim response: {}", e))
        })?;

        Ok(body.display_name)
    }
}
