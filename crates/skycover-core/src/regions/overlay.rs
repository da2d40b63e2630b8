use ndarray::{Array3, ArrayView3};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, OUTLINE_INTENSITY_CUTOFF};

use super::stencil::Stencil;

/// Single-channel intensity of an RGB pixel (BT.601 weights).
fn intensity(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}

/// Draw the region outlines over a photograph.
///
/// Pixels whose outline intensity exceeds the cutoff take the outline color,
/// every other pixel keeps the photograph. The result is masked to the field
/// of view so nothing outside the disk leaks in from the raw photograph.
pub fn overlay_outlines(photo: ArrayView3<u8>, outlines: &Array3<u8>, stencil: &Stencil) -> Array3<u8> {
    let (h, w, channels) = outlines.dim();
    let mut out = photo.to_owned();
    for row in 0..h {
        for col in 0..w {
            let (r, g, b) = (
                outlines[[row, col, 0]],
                outlines[[row, col, 1]],
                outlines[[row, col, 2]],
            );
            if intensity(r, g, b) > OUTLINE_INTENSITY_CUTOFF {
                for ch in 0..channels {
                    out[[row, col, ch]] = outlines[[row, col, ch]];
                }
            }
        }
    }
    stencil.apply_color(&mut out);
    out
}
