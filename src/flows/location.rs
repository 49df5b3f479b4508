use async_trait::async_trait;
use thiserror::Error;

use crate::shared::types::LatLng;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// One-shot device position acquisition (geolocation seam).
///
/// A single request, not a continuous watch; failure is recoverable and
/// falls back to manual address entry.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<LatLng, LocationError>;
}
