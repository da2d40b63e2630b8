use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, SkyCoverError};
use crate::regions::builder::Segmentation;

/// Load any supported image file as an 8-bit RGB raster, shape = (height, width, 3).
pub fn load_rgb(path: &Path) -> Result<Array3<u8>> {
    let img = image::open(path)?.to_rgb8();
    let (w, h) = img.dimensions();
    let mut data = Array3::<u8>::zeros((h as usize, w as usize, COLOR_CHANNEL_COUNT));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = img.get_pixel(col as u32, row as u32);
            for ch in 0..COLOR_CHANNEL_COUNT {
                data[[row, col, ch]] = pixel.0[ch];
            }
        }
    }

    Ok(data)
}

/// Save an RGB raster as 8-bit PNG.
pub fn save_rgb_png(raster: &Array3<u8>, path: &Path) -> Result<()> {
    let (h, w, channels) = raster.dim();
    if channels != COLOR_CHANNEL_COUNT || h == 0 || w == 0 {
        return Err(SkyCoverError::InvalidDimensions { width: w, height: h });
    }

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let px = [raster[[row, col, 0]], raster[[row, col, 1]], raster[[row, col, 2]]];
            img.put_pixel(col as u32, row as u32, Rgb(px));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a label raster as 8-bit grayscale PNG holding the raw codes.
pub fn save_labels_png(labels: &Array2<u8>, path: &Path) -> Result<()> {
    let (h, w) = labels.dim();
    if h == 0 || w == 0 {
        return Err(SkyCoverError::InvalidDimensions { width: w, height: h });
    }

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(col as u32, row as u32, Luma([labels[[row, col]]]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write the five segmentation rasters as `<stem>_<kind>.png` into `dir`.
pub fn save_segmentation(segmentation: &Segmentation, dir: &Path, stem: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = |kind: &str| dir.join(format!("{stem}_{kind}.png"));

    save_rgb_png(&segmentation.rasters.color, &path("regions"))?;
    save_labels_png(&segmentation.rasters.labels, &path("labels"))?;
    save_rgb_png(&segmentation.rasters.outlines, &path("outlines"))?;
    save_rgb_png(&segmentation.stencil.to_color(), &path("stencil"))?;
    save_rgb_png(&segmentation.overlay, &path("overlay"))?;
    Ok(())
}
