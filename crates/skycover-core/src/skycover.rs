//! Fractional sky cover from a thresholded ratio field.

use ndarray::{Array2, Zip};

use crate::ratio::RatioField;
use crate::regions::palette::{Palette, Region};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelClass {
    Clear,
    ThinCloud,
    OpaqueCloud,
}

/// Classify one normalized ratio. Cloud is grey (low ratio), clear sky is
/// blue (high ratio); `thin_band` widens the cut into a thin-cloud band.
pub fn classify(value: f64, threshold: f64, thin_band: f64) -> PixelClass {
    if value < threshold {
        PixelClass::OpaqueCloud
    } else if value < threshold + thin_band {
        PixelClass::ThinCloud
    } else {
        PixelClass::Clear
    }
}

/// Pixel counts per class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverCounts {
    pub clear: usize,
    pub thin: usize,
    pub opaque: usize,
}

impl CoverCounts {
    pub fn add(&mut self, class: PixelClass) {
        match class {
            PixelClass::Clear => self.clear += 1,
            PixelClass::ThinCloud => self.thin += 1,
            PixelClass::OpaqueCloud => self.opaque += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.clear + self.thin + self.opaque
    }

    fn fraction(&self, count: usize) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(count as f64 / n as f64),
        }
    }

    /// Thin plus opaque over all samples; `None` without samples.
    pub fn cloud_fraction(&self) -> Option<f64> {
        self.fraction(self.thin + self.opaque)
    }

    pub fn thin_fraction(&self) -> Option<f64> {
        self.fraction(self.thin)
    }

    pub fn opaque_fraction(&self) -> Option<f64> {
        self.fraction(self.opaque)
    }
}

/// Sky cover over the field of view and per region.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyCover {
    pub total: CoverCounts,
    /// One entry per drawn region, in z-order.
    pub regions: Vec<(Region, CoverCounts)>,
}

impl SkyCover {
    pub fn region(&self, region: Region) -> CoverCounts {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, c)| *c)
            .unwrap_or_default()
    }
}

/// Classify every sample of `field` and aggregate by region label.
///
/// Samples on background or unknown labels are ignored.
pub fn sky_cover(
    field: &RatioField,
    labels: &Array2<u8>,
    palette: &Palette,
    threshold: f64,
    thin_band: f64,
) -> SkyCover {
    let mut regions: Vec<(Region, CoverCounts)> = Region::DRAWN
        .into_iter()
        .map(|r| (r, CoverCounts::default()))
        .collect();
    let mut total = CoverCounts::default();

    Zip::from(&field.values).and(labels).for_each(|value, &code| {
        let Some(v) = *value else {
            return;
        };
        let Some(region) = palette.region_for_label(code) else {
            return;
        };
        let Some(slot) = regions.iter_mut().find(|(r, _)| *r == region) else {
            return;
        };
        let class = classify(v, threshold, thin_band);
        slot.1.add(class);
        total.add(class);
    });

    SkyCover { total, regions }
}
