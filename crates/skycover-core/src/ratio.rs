//! Normalized blue/red ratio per pixel.
//!
//! Clear sky scatters more blue than red; clouds are roughly grey. The ratio
//! `b/r` is normalized to `(b/r - 1) / (b/r + 1)`, which maps grey to 0 and
//! stays inside (-1, 1) for any non-zero channel pair.

use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{Result, SkyCoverError};
use crate::regions::palette::BACKGROUND_LABEL;

const RED: usize = 0;
const BLUE: usize = 2;

/// Per-pixel normalized ratio; `None` where the pixel has no sample.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioField {
    pub values: Array2<Option<f64>>,
}

impl RatioField {
    /// Valid samples in row-major order.
    pub fn samples(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn sample_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Normalized ratio of one pixel, or `None` if either channel is zero.
pub fn normalized_ratio(red: u8, blue: u8) -> Option<f64> {
    if red == 0 || blue == 0 {
        return None;
    }
    let ratio = blue as f64 / red as f64;
    Some((ratio - 1.0) / (ratio + 1.0))
}

/// Compute the ratio field of an RGB image.
///
/// Fails on the first non-finite value rather than carrying it forward.
pub fn ratio_field(image: ArrayView3<u8>) -> Result<RatioField> {
    let red = image.index_axis(Axis(2), RED);
    let blue = image.index_axis(Axis(2), BLUE);
    let (h, w) = red.dim();

    let zip = Zip::from(&red).and(&blue);
    let values = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_map_collect(|&r, &b| normalized_ratio(r, b))
    } else {
        zip.map_collect(|&r, &b| normalized_ratio(r, b))
    };

    if let Some(((row, col), _)) = values
        .indexed_iter()
        .find(|(_, v)| matches!(v, Some(x) if !x.is_finite()))
    {
        return Err(SkyCoverError::NonFiniteRatio { row, col });
    }

    Ok(RatioField { values })
}

/// The ratio array: valid samples of [`ratio_field`], flattened.
pub fn ratio_array(image: ArrayView3<u8>) -> Result<Vec<f64>> {
    Ok(ratio_field(image)?.samples())
}

/// Zero every pixel of `photo` whose label is background.
pub fn mask_by_labels(photo: ArrayView3<u8>, labels: &Array2<u8>) -> Array3<u8> {
    let mut masked = photo.to_owned();
    for channel in masked.axis_iter_mut(Axis(2)) {
        Zip::from(channel).and(labels).for_each(|v, &code| {
            if code == BACKGROUND_LABEL {
                *v = 0;
            }
        });
    }
    masked
}
