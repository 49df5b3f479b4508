use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair. Used by the client flows for device location,
/// map taps, and marker placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are real numbers (no NaN, no infinities).
    pub fn is_well_formed(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_rejects_nan_and_infinity() {
        assert!(LatLng::new(21.88, -102.29).is_well_formed());
        assert!(LatLng::new(0.0, 0.0).is_well_formed());
        assert!(!LatLng::new(f64::NAN, -102.29).is_well_formed());
        assert!(!LatLng::new(21.88, f64::INFINITY).is_well_formed());
    }
}
