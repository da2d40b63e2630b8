use serde::{Deserialize, Serialize};

use crate::consts::{
    COLOR_CHANNEL_COUNT, DEFAULT_BAND_INNER_RADIUS, DEFAULT_BAND_OUTER_RADIUS,
    DEFAULT_BAND_THICKNESS, DEFAULT_DISPERSION_THRESHOLD, DEFAULT_FIXED_THRESHOLD, DEFAULT_HEIGHT,
    DEFAULT_HORIZON_WIDTH_DEG, DEFAULT_INNER_RADIUS, DEFAULT_MCE_BINS, DEFAULT_MINIMUM_ALTITUDE_DEG,
    DEFAULT_MIRROR_INTERCEPT, DEFAULT_MIRROR_RADIUS, DEFAULT_MIRROR_SLOPE,
    DEFAULT_OUTER_RADIUS, DEFAULT_OUTLINE_THICKNESS, DEFAULT_SUN_RADIUS, DEFAULT_WIDTH,
};
use crate::error::{Result, SkyCoverError};
use crate::regions::palette::{Palette, Region, BACKGROUND_COLOR, BACKGROUND_LABEL};

/// Everything the analysis needs to know about the instrument.
///
/// Built once at startup, validated, then shared by reference with every
/// stage. Nothing in the core mutates it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Sensor geometry. Required: there is no sensible default for a
    /// configuration file that forgets it.
    pub resolution: Resolution,
    #[serde(default)]
    pub regions: RegionGeometry,
    #[serde(default)]
    pub mirror: MirrorModel,
    #[serde(default)]
    pub occlusion: OcclusionGeometry,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub threshold: ThresholdConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub sun: SunConfig,
}

impl InstrumentConfig {
    /// Check every constant the core relies on. Run once before any image.
    pub fn validate(&self) -> Result<()> {
        let res = &self.resolution;
        if res.width == 0 || res.height == 0 {
            return Err(SkyCoverError::InvalidDimensions {
                width: res.width,
                height: res.height,
            });
        }
        if res.channels != COLOR_CHANNEL_COUNT {
            return invalid(format!(
                "resolution.channels must be {COLOR_CHANNEL_COUNT}, got {}",
                res.channels
            ));
        }

        let r = &self.regions;
        for (name, value) in [
            ("regions.outer_radius", r.outer_radius),
            ("regions.inner_radius", r.inner_radius),
            ("regions.sun_radius", r.sun_radius),
            ("regions.mirror_radius", r.mirror_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if r.inner_radius >= r.outer_radius {
            return invalid(format!(
                "regions.inner_radius ({}) must be smaller than regions.outer_radius ({})",
                r.inner_radius, r.outer_radius
            ));
        }
        if !(r.outline_thickness.is_finite() && r.outline_thickness >= 0.0) {
            return invalid(format!(
                "regions.outline_thickness must be non-negative, got {}",
                r.outline_thickness
            ));
        }
        if !(0.0..=360.0).contains(&r.horizon_width_deg) {
            return invalid(format!(
                "regions.horizon_width_deg must lie in [0, 360], got {}",
                r.horizon_width_deg
            ));
        }

        let m = &self.mirror;
        if !m.slope.is_finite() || m.slope == 0.0 || !m.intercept.is_finite() {
            return invalid(format!(
                "mirror model needs a finite non-zero slope and finite intercept, got a={} c={}",
                m.slope, m.intercept
            ));
        }

        let o = &self.occlusion;
        if !(o.band_thickness.is_finite() && o.band_thickness >= 0.0) {
            return invalid(format!(
                "occlusion.band_thickness must be non-negative, got {}",
                o.band_thickness
            ));
        }
        if !(o.band_inner_radius.is_finite() && o.band_outer_radius.is_finite()) {
            return invalid("occlusion band radii must be finite".to_string());
        }

        self.palette.validate()?;

        let t = &self.threshold;
        if t.bins < 3 {
            return invalid(format!("threshold.bins must be at least 3, got {}", t.bins));
        }
        if !t.fixed_threshold.is_finite() || !t.dispersion_threshold.is_finite() {
            return invalid("threshold values must be finite".to_string());
        }
        if !(self.classification.thin_band.is_finite() && self.classification.thin_band >= 0.0) {
            return invalid(format!(
                "classification.thin_band must be non-negative, got {}",
                self.classification.thin_band
            ));
        }
        if !self.sun.minimum_altitude_deg.is_finite() {
            return invalid("sun.minimum_altitude_deg must be finite".to_string());
        }

        Ok(())
    }

    /// Image-plane centre, using integer halves of the resolution.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.resolution.width / 2) as f64,
            (self.resolution.height / 2) as f64,
        )
    }
}

fn invalid(message: String) -> Result<()> {
    Err(SkyCoverError::InvalidConfig(message))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_channels")]
    pub channels: usize,
}

fn default_channels() -> usize {
    COLOR_CHANNEL_COUNT
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            channels: COLOR_CHANNEL_COUNT,
        }
    }
}

/// Radii and stroke widths of the segmentation regions, in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionGeometry {
    /// Field-of-view disk; also the stencil radius.
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub sun_radius: f64,
    /// Radius of the mirror, used by the projection model.
    pub mirror_radius: f64,
    pub outline_thickness: f64,
    /// Full angular width of the horizon wedge.
    pub horizon_width_deg: f64,
}

impl Default for RegionGeometry {
    fn default() -> Self {
        Self {
            outer_radius: DEFAULT_OUTER_RADIUS,
            inner_radius: DEFAULT_INNER_RADIUS,
            sun_radius: DEFAULT_SUN_RADIUS,
            mirror_radius: DEFAULT_MIRROR_RADIUS,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            horizon_width_deg: DEFAULT_HORIZON_WIDTH_DEG,
        }
    }
}

/// Calibration of the mirror's radial response, `y = slope * x + intercept`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorModel {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for MirrorModel {
    fn default() -> Self {
        Self {
            slope: DEFAULT_MIRROR_SLOPE,
            intercept: DEFAULT_MIRROR_INTERCEPT,
        }
    }
}

/// Axis-aligned rectangle with inclusive corners, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Parts of the instrument that block the sky: the camera arm (fixed) and
/// the shadow band (follows the sun's azimuth).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionGeometry {
    pub arms: Vec<PixelRect>,
    pub band_inner_radius: f64,
    pub band_outer_radius: f64,
    pub band_thickness: f64,
}

impl Default for OcclusionGeometry {
    fn default() -> Self {
        Self {
            arms: vec![
                PixelRect::new(141, 190, 154, 153),
                PixelRect::new(145, 154, 152, 91),
                PixelRect::new((DEFAULT_WIDTH / 2) as i64, 91, 152, 26),
            ],
            band_inner_radius: DEFAULT_BAND_INNER_RADIUS,
            band_outer_radius: DEFAULT_BAND_OUTER_RADIUS,
            band_thickness: DEFAULT_BAND_THICKNESS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Normalized-ratio threshold used when the spread is small.
    pub fixed_threshold: f64,
    /// Standard deviation at or below which `fixed_threshold` is used.
    pub dispersion_threshold: f64,
    /// Histogram bins for minimum cross-entropy thresholding.
    pub bins: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            fixed_threshold: DEFAULT_FIXED_THRESHOLD,
            dispersion_threshold: DEFAULT_DISPERSION_THRESHOLD,
            bins: DEFAULT_MCE_BINS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Width of the thin-cloud band above the threshold. Zero means a single
    /// cloud/clear cut.
    pub thin_band: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// No sun disk is drawn below this altitude.
    pub minimum_altitude_deg: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            minimum_altitude_deg: DEFAULT_MINIMUM_ALTITUDE_DEG,
        }
    }
}

impl Palette {
    /// Labels must be unique and non-zero, colors unique and never the
    /// background color; otherwise the color and label rasters disagree.
    pub fn validate(&self) -> Result<()> {
        let regions = Region::DRAWN;
        for (i, a) in regions.iter().enumerate() {
            let sa = self.style(*a);
            if sa.label == BACKGROUND_LABEL {
                return invalid(format!("palette label for {a} must be non-zero"));
            }
            if sa.color == BACKGROUND_COLOR {
                return invalid(format!("palette color for {a} must differ from background"));
            }
            for b in &regions[i + 1..] {
                let sb = self.style(*b);
                if sa.label == sb.label {
                    return invalid(format!("palette label {} shared by {a} and {b}", sa.label));
                }
                if sa.color == sb.color {
                    return invalid(format!("palette color {:?} shared by {a} and {b}", sa.color));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        InstrumentConfig::default().validate().unwrap();
    }

    #[test]
    fn test_center_uses_integer_halves() {
        let mut config = InstrumentConfig::default();
        config.resolution.width = 353;
        config.resolution.height = 289;
        assert_eq!(config.center(), (176.0, 144.0));
    }

    #[test]
    fn test_inner_radius_must_be_smaller() {
        let mut config = InstrumentConfig::default();
        config.regions.inner_radius = config.regions.outer_radius;
        assert!(matches!(
            config.validate(),
            Err(SkyCoverError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut config = InstrumentConfig::default();
        config.resolution.width = 0;
        assert!(matches!(
            config.validate(),
            Err(SkyCoverError::InvalidDimensions { width: 0, .. })
        ));
    }
}
