use serde::{Deserialize, Serialize};

/// 8-bit RGB triple.
pub type Rgb = [u8; 3];

pub const BACKGROUND_COLOR: Rgb = [0, 0, 0];
pub const BACKGROUND_LABEL: u8 = 0;

pub const RED: Rgb = [255, 0, 0];
pub const CYAN: Rgb = [0, 255, 255];
pub const GREEN: Rgb = [0, 255, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const WHITE: Rgb = [255, 255, 255];

/// A named, mutually exclusive area of the segmented sky image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Outside the field of view, or occluded.
    Background,
    /// Ring between the inner disk and the field-of-view edge.
    Outer,
    /// Wedge towards the horizon below the sun.
    Horizon,
    /// Disk around the zenith.
    Inner,
    /// Disk around the sun.
    Sun,
}

impl Region {
    /// Regions that are drawn, in z-order.
    pub const DRAWN: [Region; 4] = [Region::Outer, Region::Horizon, Region::Inner, Region::Sun];
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::Outer => write!(f, "outer"),
            Self::Horizon => write!(f, "horizon"),
            Self::Inner => write!(f, "inner"),
            Self::Sun => write!(f, "sun"),
        }
    }
}

/// How one region appears on each of the three co-registered rasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStyle {
    /// Fill on the color raster.
    pub color: Rgb,
    /// Code on the label raster.
    pub label: u8,
    /// Border stroke on the outline raster.
    pub stroke: Rgb,
}

impl RegionStyle {
    pub const BACKGROUND: RegionStyle = RegionStyle {
        color: BACKGROUND_COLOR,
        label: BACKGROUND_LABEL,
        stroke: BACKGROUND_COLOR,
    };

    const fn solid(color: Rgb, label: u8) -> Self {
        Self {
            color,
            label,
            stroke: color,
        }
    }
}

/// The single color <-> label table shared by every drawing operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub outer: RegionStyle,
    pub horizon: RegionStyle,
    pub inner: RegionStyle,
    pub sun: RegionStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            outer: RegionStyle::solid(RED, 1),
            horizon: RegionStyle::solid(CYAN, 2),
            inner: RegionStyle::solid(GREEN, 3),
            sun: RegionStyle::solid(YELLOW, 4),
        }
    }
}

impl Palette {
    pub fn style(&self, region: Region) -> RegionStyle {
        match region {
            Region::Background => RegionStyle::BACKGROUND,
            Region::Outer => self.outer,
            Region::Horizon => self.horizon,
            Region::Inner => self.inner,
            Region::Sun => self.sun,
        }
    }

    /// Reverse lookup of a label code. Unknown codes yield `None`.
    pub fn region_for_label(&self, label: u8) -> Option<Region> {
        if label == BACKGROUND_LABEL {
            return Some(Region::Background);
        }
        Region::DRAWN
            .into_iter()
            .find(|&region| self.style(region).label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup_round_trips() {
        let palette = Palette::default();
        for region in Region::DRAWN {
            let label = palette.style(region).label;
            assert_eq!(palette.region_for_label(label), Some(region));
        }
        assert_eq!(palette.region_for_label(0), Some(Region::Background));
        assert_eq!(palette.region_for_label(200), None);
    }
}
