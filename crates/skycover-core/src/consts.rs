/// Minimum pixel count (h*w) to use Rayon-backed element-wise maps.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color raster (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Outline intensity above which an overlay pixel counts as an outline stroke.
pub const OUTLINE_INTENSITY_CUTOFF: f32 = 10.0;

/// Shoelace area (px^2) below which a polygon is considered degenerate.
pub const DEGENERATE_POLYGON_AREA: f64 = 1e-6;

/// Default sensor resolution of the sky imager.
pub const DEFAULT_WIDTH: usize = 352;
pub const DEFAULT_HEIGHT: usize = 288;

/// Default region radii, in pixels.
pub const DEFAULT_OUTER_RADIUS: f64 = 130.0;
pub const DEFAULT_INNER_RADIUS: f64 = 80.0;
pub const DEFAULT_SUN_RADIUS: f64 = 40.0;
pub const DEFAULT_MIRROR_RADIUS: f64 = 140.0;

/// Default stroke thickness for region outlines, in pixels.
pub const DEFAULT_OUTLINE_THICKNESS: f64 = 3.0;

/// Default angular width of the horizon wedge, in degrees.
pub const DEFAULT_HORIZON_WIDTH_DEG: f64 = 50.0;

/// Linear fit of the mirror's radial response, `y = a*x + c`.
pub const DEFAULT_MIRROR_SLOPE: f64 = -0.23;
pub const DEFAULT_MIRROR_INTERCEPT: f64 = 1.25;

/// Default shadow band geometry, in pixels.
pub const DEFAULT_BAND_INNER_RADIUS: f64 = 40.0;
pub const DEFAULT_BAND_OUTER_RADIUS: f64 = 140.0;
pub const DEFAULT_BAND_THICKNESS: f64 = 35.0;

/// Sun altitude (degrees) below which no sun disk is placed.
pub const DEFAULT_MINIMUM_ALTITUDE_DEG: f64 = 10.0;

/// Threshold on the normalized ratio used when the ratio spread is small.
pub const DEFAULT_FIXED_THRESHOLD: f64 = 0.20;

/// Standard deviation at or below which the fixed threshold is used.
pub const DEFAULT_DISPERSION_THRESHOLD: f64 = 0.065;

/// Number of histogram bins for minimum cross-entropy thresholding.
pub const DEFAULT_MCE_BINS: usize = 100;
