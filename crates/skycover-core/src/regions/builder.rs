use ndarray::{s, Array3, ArrayView3};
use tracing::{debug, warn};

use crate::config::InstrumentConfig;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, SkyCoverError};
use crate::observation::SolarPosition;
use crate::projection::{sun_position, SunPosition};

use super::draw::Shape;
use super::overlay::overlay_outlines;
use super::palette::Region;
use super::raster::RegionRasters;
use super::stencil::Stencil;

/// What happened to the sun disk for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SunPlacement {
    Placed(SunPosition),
    /// Sun below the configured minimum altitude; no disk drawn.
    BelowMinimumAltitude,
    /// The mirror model has no real solution at this altitude.
    Unresolved { discriminant: f64 },
}

impl SunPlacement {
    pub fn position(&self) -> Option<SunPosition> {
        match self {
            Self::Placed(pos) => Some(*pos),
            _ => None,
        }
    }
}

impl std::fmt::Display for SunPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed(pos) => write!(f, "({:.1}, {:.1})", pos.x, pos.y),
            Self::BelowMinimumAltitude => write!(f, "below minimum altitude"),
            Self::Unresolved { .. } => write!(f, "unresolved"),
        }
    }
}

/// Segmentation of one image.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub rasters: RegionRasters,
    pub stencil: Stencil,
    /// Photograph with region outlines and occlusions drawn in.
    pub overlay: Array3<u8>,
    /// Azimuth from East, radians.
    pub theta: f64,
    pub sun: SunPlacement,
}

/// Outer disk: the whole field of view.
pub fn draw_outer_disk(rasters: &mut RegionRasters, config: &InstrumentConfig) {
    let (cx, cy) = config.center();
    let disk = Shape::Disk {
        cx,
        cy,
        radius: config.regions.outer_radius,
    };
    rasters.paint(&disk, config.palette.style(Region::Outer), config.regions.outline_thickness);
}

/// Horizon wedge vertices: the centre, then three points at half the image
/// width along `theta - w/2`, `theta`, `theta + w/2`.
pub fn horizon_wedge(config: &InstrumentConfig, theta: f64) -> Shape {
    let (cx, cy) = config.center();
    let reach = (config.resolution.width / 2) as f64;
    let half_width = config.regions.horizon_width_deg.to_radians() / 2.0;
    let at = |angle: f64| (cx + reach * angle.cos(), cy + reach * angle.sin());
    Shape::Polygon(vec![
        (cx, cy),
        at(theta - half_width),
        at(theta),
        at(theta + half_width),
    ])
}

/// Horizon wedge. A zero-width wedge has no area and is not drawn.
pub fn draw_horizon_wedge(rasters: &mut RegionRasters, config: &InstrumentConfig, theta: f64) {
    let wedge = horizon_wedge(config, theta);
    if wedge.is_degenerate() {
        debug!(width_deg = config.regions.horizon_width_deg, "Horizon wedge is degenerate, skipping");
        return;
    }
    rasters.paint(&wedge, config.palette.style(Region::Horizon), config.regions.outline_thickness);
}

pub fn draw_inner_disk(rasters: &mut RegionRasters, config: &InstrumentConfig) {
    let (cx, cy) = config.center();
    let disk = Shape::Disk {
        cx,
        cy,
        radius: config.regions.inner_radius,
    };
    rasters.paint(&disk, config.palette.style(Region::Inner), config.regions.outline_thickness);
}

/// Sun disk at the projected solar position.
///
/// A low sun or an unresolvable projection skips the disk; the image is
/// still segmented and the outcome is reported on the returned placement.
pub fn draw_sun_disk(rasters: &mut RegionRasters, config: &InstrumentConfig, solar: &SolarPosition) -> SunPlacement {
    if solar.altitude_deg < config.sun.minimum_altitude_deg {
        debug!(
            altitude = solar.altitude_deg,
            minimum = config.sun.minimum_altitude_deg,
            "Sun below minimum altitude, no sun disk"
        );
        return SunPlacement::BelowMinimumAltitude;
    }

    match sun_position(config, solar.altitude_deg, solar.theta()) {
        Ok(pos) => {
            let disk = Shape::Disk {
                cx: pos.x,
                cy: pos.y,
                radius: config.regions.sun_radius,
            };
            rasters.paint(&disk, config.palette.style(Region::Sun), config.regions.outline_thickness);
            debug!(x = pos.x, y = pos.y, radius = pos.radius, "Sun disk placed");
            SunPlacement::Placed(pos)
        }
        Err(SkyCoverError::GeometryDomain { discriminant, .. }) => {
            warn!(
                altitude = solar.altitude_deg,
                discriminant, "Sun position unresolvable, no sun disk"
            );
            SunPlacement::Unresolved { discriminant }
        }
        Err(e) => {
            warn!(error = %e, "Sun projection failed, no sun disk");
            SunPlacement::Unresolved {
                discriminant: f64::NAN,
            }
        }
    }
}

/// Camera arm rectangles, blanked on colors, labels and the overlay.
pub fn draw_arm(rasters: &mut RegionRasters, overlay: &mut Array3<u8>, config: &InstrumentConfig) {
    for rect in &config.occlusion.arms {
        rasters.erase(&Shape::Rect(*rect), overlay);
    }
}

/// Shadow band: a thick radial segment along the sun's azimuth.
pub fn draw_band(rasters: &mut RegionRasters, overlay: &mut Array3<u8>, config: &InstrumentConfig, theta: f64) {
    let (cx, cy) = config.center();
    let o = &config.occlusion;
    let (cos_t, sin_t) = (theta.cos(), theta.sin());
    let band = Shape::Segment {
        from: (cx + o.band_inner_radius * cos_t, cy + o.band_inner_radius * sin_t),
        to: (cx + o.band_outer_radius * cos_t, cy + o.band_outer_radius * sin_t),
        thickness: o.band_thickness,
    };
    rasters.erase(&band, overlay);
}

/// Draw the four sun-dependent regions in z-order, without masking.
pub fn build_regions(config: &InstrumentConfig, solar: &SolarPosition) -> (RegionRasters, SunPlacement) {
    let mut rasters = RegionRasters::new(config.resolution.height, config.resolution.width);
    let theta = solar.theta();

    draw_outer_disk(&mut rasters, config);
    draw_horizon_wedge(&mut rasters, config, theta);
    draw_inner_disk(&mut rasters, config);
    let sun = draw_sun_disk(&mut rasters, config, solar);

    (rasters, sun)
}

/// The top-left `height x width` window of `photo`.
///
/// Photographs larger than the configured resolution are cropped; smaller
/// ones or ones with the wrong channel count are rejected.
pub fn crop_to_resolution<'a>(photo: &'a Array3<u8>, config: &InstrumentConfig) -> Result<ArrayView3<'a, u8>> {
    let (h, w, channels) = photo.dim();
    let (want_w, want_h) = (config.resolution.width, config.resolution.height);
    if h < want_h || w < want_w || channels != COLOR_CHANNEL_COUNT {
        return Err(SkyCoverError::DimensionMismatch {
            width: w,
            height: h,
            channels,
            expected_width: want_w,
            expected_height: want_h,
        });
    }
    Ok(photo.slice(s![..want_h, ..want_w, ..]))
}

/// Segment one photograph.
///
/// Regions are drawn in z-order, masked to the field of view, outlined over
/// the photograph, and finally the arm and band occlusions are blanked.
pub fn segment(config: &InstrumentConfig, photo: &Array3<u8>, solar: &SolarPosition) -> Result<Segmentation> {
    let photo = crop_to_resolution(photo, config)?;
    let theta = solar.theta();

    let (mut rasters, sun) = build_regions(config, solar);

    let stencil = Stencil::field_of_view(config);
    stencil.apply(&mut rasters);

    let mut overlay = overlay_outlines(photo, &rasters.outlines, &stencil);

    draw_arm(&mut rasters, &mut overlay, config);
    draw_band(&mut rasters, &mut overlay, config, theta);

    Ok(Segmentation {
        rasters,
        stencil,
        overlay,
        theta,
        sun,
    })
}
