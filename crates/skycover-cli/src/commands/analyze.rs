use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skycover_core::io::image_io::{load_rgb, save_segmentation};
use skycover_core::observation::SolarPosition;
use skycover_core::pipeline::analyze_image;

use super::load_config;
use crate::summary::print_image_summary;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input sky image
    pub file: PathBuf,

    /// Solar azimuth in degrees from North
    #[arg(long)]
    pub azimuth: f64,

    /// Solar altitude in degrees above the horizon
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: f64,

    /// Instrument config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Width of the thin-cloud band above the threshold
    #[arg(long)]
    pub thin_band: Option<f64>,

    /// Write the segmentation rasters into this directory
    #[arg(long)]
    pub save_rasters: Option<PathBuf>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(thin_band) = args.thin_band {
        config.classification.thin_band = thin_band;
    }
    config.validate().context("Instrument config rejected")?;

    let photo = load_rgb(&args.file)
        .with_context(|| format!("Failed to load image {}", args.file.display()))?;
    let solar = SolarPosition::new(args.azimuth, args.altitude);
    let analysis = analyze_image(&config, &photo, &solar)
        .with_context(|| format!("Failed to analyze {}", args.file.display()))?;

    if let Some(ref dir) = args.save_rasters {
        let stem = args
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        save_segmentation(&analysis.segmentation, dir, stem)
            .with_context(|| format!("Failed to write rasters to {}", dir.display()))?;
        println!("Rasters saved to {}", dir.display());
    }

    print_image_summary(&args.file, &solar, &analysis.summary());
    Ok(())
}
