use ndarray::{Array2, Array3};

use crate::consts::COLOR_CHANNEL_COUNT;

use super::draw::{fill_color, fill_label, stroke_color, Shape};
use super::palette::{RegionStyle, BACKGROUND_COLOR, BACKGROUND_LABEL};

/// The three co-registered rasters of a segmentation.
///
/// Every region is painted through [`RegionRasters::paint`], which applies
/// one shape to all three surfaces, so they cannot drift apart.
#[derive(Clone, Debug)]
pub struct RegionRasters {
    /// Display colors, shape = (height, width, 3).
    pub color: Array3<u8>,
    /// Region codes, shape = (height, width).
    pub labels: Array2<u8>,
    /// Region borders only, shape = (height, width, 3).
    pub outlines: Array3<u8>,
}

impl RegionRasters {
    /// All-background rasters.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            color: Array3::zeros((height, width, COLOR_CHANNEL_COUNT)),
            labels: Array2::zeros((height, width)),
            outlines: Array3::zeros((height, width, COLOR_CHANNEL_COUNT)),
        }
    }

    pub fn height(&self) -> usize {
        self.labels.nrows()
    }

    pub fn width(&self) -> usize {
        self.labels.ncols()
    }

    /// Paint a region: fill on the color and label rasters; on the outline
    /// raster clear the interior and stroke the border.
    pub fn paint(&mut self, shape: &Shape, style: RegionStyle, outline_thickness: f64) {
        if shape.is_degenerate() {
            return;
        }
        fill_color(&mut self.color, shape, style.color);
        fill_label(&mut self.labels, shape, style.label);
        fill_color(&mut self.outlines, shape, BACKGROUND_COLOR);
        stroke_color(&mut self.outlines, shape, outline_thickness, style.stroke);
    }

    /// Blank a shape to background on the color and label rasters and on
    /// `overlay`. The outline raster is left alone.
    pub fn erase(&mut self, shape: &Shape, overlay: &mut Array3<u8>) {
        fill_color(&mut self.color, shape, BACKGROUND_COLOR);
        fill_label(&mut self.labels, shape, BACKGROUND_LABEL);
        fill_color(overlay, shape, BACKGROUND_COLOR);
    }

    /// Whether pixel (row, col) carries the background color.
    pub fn is_background_color(&self, row: usize, col: usize) -> bool {
        (0..COLOR_CHANNEL_COUNT).all(|ch| self.color[[row, col, ch]] == BACKGROUND_COLOR[ch])
    }
}
