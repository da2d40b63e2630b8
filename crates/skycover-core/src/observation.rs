use serde::{Deserialize, Serialize};

/// Solar position for one exposure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Degrees clockwise from North, 0..360.
    pub azimuth_deg: f64,
    /// Degrees above the horizon.
    pub altitude_deg: f64,
}

impl SolarPosition {
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth_deg,
            altitude_deg,
        }
    }

    /// Azimuth as a mathematical angle measured from East, in radians.
    ///
    /// Every placement that depends on the sun's direction (horizon wedge,
    /// sun disk, shadow band) uses this angle.
    pub fn theta(&self) -> f64 {
        (self.azimuth_deg - 90.0).to_radians()
    }
}
