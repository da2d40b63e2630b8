//! Mirror projection: where the sun lands in the image plane.
//!
//! The mirror's radial response is approximated by the linear fit
//! `y = a*x + c`. Inverting it for a given solar altitude gives the quadratic
//! `a*r^2 + b*r + c = 0` with `b = -tan(altitude)`, solved in units of the
//! mirror radius.

use crate::config::{InstrumentConfig, MirrorModel};
use crate::error::{Result, SkyCoverError};

/// Sun centre in the image plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPosition {
    /// Distance from the image centre, in pixels.
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

/// Discriminant of the mirror quadratic at `altitude_deg`.
pub fn discriminant(mirror: &MirrorModel, altitude_deg: f64) -> f64 {
    let b = -altitude_deg.to_radians().tan();
    b * b - 4.0 * mirror.slope * mirror.intercept
}

/// Radial distance of the sun from the image centre, in pixels.
///
/// No altitude clamping happens here; callers that want to ignore a low sun
/// check the altitude themselves.
pub fn radial_distance(mirror: &MirrorModel, mirror_radius: f64, altitude_deg: f64) -> Result<f64> {
    let a = mirror.slope;
    let b = -altitude_deg.to_radians().tan();
    let d = discriminant(mirror, altitude_deg);
    if d < 0.0 || d.is_nan() {
        return Err(SkyCoverError::GeometryDomain {
            altitude_deg,
            discriminant: d,
        });
    }

    let r = mirror_radius * (-b - d.sqrt()) / (2.0 * a) / 2.0;
    if !r.is_finite() {
        return Err(SkyCoverError::GeometryDomain {
            altitude_deg,
            discriminant: d,
        });
    }
    Ok(r)
}

/// Project the sun onto the image plane.
///
/// `theta` is the azimuth measured from East in radians (see
/// [`SolarPosition::theta`](crate::observation::SolarPosition::theta)).
pub fn sun_position(config: &InstrumentConfig, altitude_deg: f64, theta: f64) -> Result<SunPosition> {
    let radius = radial_distance(&config.mirror, config.regions.mirror_radius, altitude_deg)?;
    let (cx, cy) = config.center();
    Ok(SunPosition {
        radius,
        x: cx + radius * theta.cos(),
        y: cy + radius * theta.sin(),
    })
}
