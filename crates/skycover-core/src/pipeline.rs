use std::path::{Component, Path};
use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array3;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::InstrumentConfig;
use crate::error::Result;
use crate::io::image_io::{load_rgb, save_segmentation};
use crate::io::manifest::Observation;
use crate::observation::SolarPosition;
use crate::ratio::{mask_by_labels, ratio_field, RatioField};
use crate::regions::builder::{crop_to_resolution, segment, Segmentation, SunPlacement};
use crate::skycover::{sky_cover, SkyCover};
use crate::threshold::hybrid::{select_threshold, HybridThreshold, ThresholdMethod};

/// Everything derived from one photograph.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub segmentation: Segmentation,
    /// Photograph with background and occluded pixels zeroed.
    pub masked: Array3<u8>,
    pub ratios: RatioField,
    pub threshold: HybridThreshold,
    pub sky_cover: SkyCover,
}

impl ImageAnalysis {
    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            sun: self.segmentation.sun,
            std_dev: self.threshold.std_dev,
            threshold: self.threshold.threshold,
            method: self.threshold.method,
            degenerate: self.threshold.is_degenerate(),
            samples: self.threshold.ratios.len(),
            sky_cover: self.sky_cover.clone(),
        }
    }
}

/// Per-image statistics, without the rasters.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSummary {
    pub sun: SunPlacement,
    pub std_dev: f64,
    pub threshold: f64,
    pub method: ThresholdMethod,
    pub degenerate: bool,
    pub samples: usize,
    pub sky_cover: SkyCover,
}

/// Analyze one photograph taken with the sun at `solar`.
///
/// `config` must already be validated.
pub fn analyze_image(config: &InstrumentConfig, photo: &Array3<u8>, solar: &SolarPosition) -> Result<ImageAnalysis> {
    let segmentation = segment(config, photo, solar)?;

    let cropped = crop_to_resolution(photo, config)?;
    let masked = mask_by_labels(cropped, &segmentation.rasters.labels);

    let ratios = ratio_field(masked.view())?;
    let threshold = select_threshold(ratios.samples(), &config.threshold)?;

    let cover = sky_cover(
        &ratios,
        &segmentation.rasters.labels,
        &config.palette,
        threshold.threshold,
        config.classification.thin_band,
    );

    Ok(ImageAnalysis {
        segmentation,
        masked,
        ratios,
        threshold,
        sky_cover: cover,
    })
}

/// Progress callbacks for batch analysis. All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn begin(&self, _total_items: usize) {}

    /// One image has finished, successfully or not.
    fn advance(&self, _items_done: usize) {}

    fn finish(&self) {}
}

pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of one manifest entry.
#[derive(Debug)]
pub struct BatchOutcome {
    pub observation: Observation,
    pub result: Result<ImageSummary>,
}

/// Raster file prefix for a manifest image path: the relative path without
/// its extension, components joined by `_`. `day1/img.jpg` becomes `day1_img`.
pub fn raster_stem(image: &Path) -> String {
    let parts: Vec<String> = image
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        "image".to_string()
    } else {
        parts.join("_")
    }
}

/// Load and analyze one manifest entry; image paths resolve against `base_dir`.
pub fn analyze_observation(
    config: &InstrumentConfig,
    observation: &Observation,
    base_dir: &Path,
    raster_dir: Option<&Path>,
) -> Result<ImageSummary> {
    let path = base_dir.join(&observation.image);
    let photo = load_rgb(&path)?;
    let analysis = analyze_image(config, &photo, &observation.solar())?;

    if let Some(dir) = raster_dir {
        save_segmentation(&analysis.segmentation, dir, &raster_stem(&observation.image))?;
    }

    Ok(analysis.summary())
}

/// Analyze every observation in parallel. A failing image is reported in
/// its own outcome and never stops the others.
pub fn analyze_batch(
    config: &InstrumentConfig,
    observations: &[Observation],
    base_dir: &Path,
    raster_dir: Option<&Path>,
    reporter: &dyn ProgressReporter,
) -> Vec<BatchOutcome> {
    info!(images = observations.len(), "Starting batch analysis");
    reporter.begin(observations.len());
    let done = AtomicUsize::new(0);

    let outcomes: Vec<BatchOutcome> = observations
        .par_iter()
        .map(|obs| {
            let result = analyze_observation(config, obs, base_dir, raster_dir);
            if let Err(ref e) = result {
                warn!(image = %obs.image.display(), error = %e, "Image analysis failed");
            }
            reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
            BatchOutcome {
                observation: obs.clone(),
                result,
            }
        })
        .collect();

    reporter.finish();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(images = outcomes.len(), failed, "Batch analysis finished");
    outcomes
}
