mod nominatim_client;

pub use nominatim_client::NominatimClient;

use async_trait::async_trait;

use crate::core::error::Result;

/// Coordinate-to-address translation, backed by an external service.
///
/// Failures here are never fatal for callers: the submission flow logs and
/// keeps whatever address the user already has.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve coordinates to a human-readable address, or `None` when the
    /// service has no answer for the location.
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<String>>;
}
