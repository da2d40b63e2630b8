use ndarray::{Array2, Array3, Zip};

use crate::config::InstrumentConfig;

use super::draw::Shape;
use super::palette::{BACKGROUND_LABEL, WHITE};
use super::raster::RegionRasters;

/// Field-of-view stencil: a filled disk of the outer radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Stencil {
    mask: Array2<bool>,
}

impl Stencil {
    /// Build the stencil for the configured resolution.
    pub fn field_of_view(config: &InstrumentConfig) -> Self {
        let (cx, cy) = config.center();
        let disk = Shape::Disk {
            cx,
            cy,
            radius: config.regions.outer_radius,
        };
        let mask = Array2::from_shape_fn(
            (config.resolution.height, config.resolution.width),
            |(row, col)| disk.contains(col as f64, row as f64),
        );
        Self { mask }
    }

    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask[[row, col]]
    }

    /// Number of in-view pixels.
    pub fn area(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    /// Color variant: white inside the disk, black outside.
    pub fn to_color(&self) -> Array3<u8> {
        let (h, w) = self.mask.dim();
        Array3::from_shape_fn((h, w, WHITE.len()), |(row, col, ch)| {
            if self.mask[[row, col]] {
                WHITE[ch]
            } else {
                0
            }
        })
    }

    /// Label variant: 1 inside the disk, 0 outside.
    pub fn to_labels(&self) -> Array2<u8> {
        self.mask.mapv(u8::from)
    }

    /// Bitwise AND with the white color stencil: zero outside the disk.
    pub fn apply_color(&self, raster: &mut Array3<u8>) {
        let white = self.to_color();
        Zip::from(raster).and(&white).for_each(|px, &s| *px &= s);
    }

    /// Masked copy: codes survive inside the disk, background elsewhere.
    pub fn apply_labels(&self, labels: &mut Array2<u8>) {
        Zip::from(labels).and(&self.mask).for_each(|code, &inside| {
            if !inside {
                *code = BACKGROUND_LABEL;
            }
        });
    }

    /// Mask all three region rasters.
    pub fn apply(&self, rasters: &mut RegionRasters) {
        self.apply_color(&mut rasters.color);
        self.apply_labels(&mut rasters.labels);
        self.apply_color(&mut rasters.outlines);
    }
}
