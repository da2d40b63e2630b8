//! CSV manifest of observations in, CSV table of per-image results out.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::observation::SolarPosition;
use crate::pipeline::{BatchOutcome, ImageSummary};
use crate::regions::builder::SunPlacement;
use crate::regions::palette::Region;

/// One manifest row: an image and the solar position when it was taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub image: PathBuf,
    /// Degrees from North.
    pub azimuth: f64,
    /// Degrees above the horizon.
    pub altitude: f64,
}

impl Observation {
    pub fn solar(&self) -> SolarPosition {
        SolarPosition::new(self.azimuth, self.altitude)
    }
}

/// Read a manifest with header `image,azimuth,altitude`.
pub fn read_manifest(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut observations = Vec::new();
    for row in reader.deserialize() {
        observations.push(row?);
    }
    Ok(observations)
}

const HEADER: [&str; 19] = [
    "image",
    "azimuth",
    "altitude",
    "sun",
    "sun_x",
    "sun_y",
    "std_dev",
    "threshold",
    "method",
    "degenerate",
    "samples",
    "cloud_fraction",
    "thin_fraction",
    "opaque_fraction",
    "outer_cloud_fraction",
    "horizon_cloud_fraction",
    "inner_cloud_fraction",
    "sun_cloud_fraction",
    "error",
];

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn sun_status(sun: &SunPlacement) -> &'static str {
    match sun {
        SunPlacement::Placed(_) => "placed",
        SunPlacement::BelowMinimumAltitude => "below_minimum",
        SunPlacement::Unresolved { .. } => "unresolved",
    }
}

fn summary_record(obs: &Observation, summary: &ImageSummary) -> Vec<String> {
    let pos = summary.sun.position();
    let cover = &summary.sky_cover;
    vec![
        obs.image.display().to_string(),
        obs.azimuth.to_string(),
        obs.altitude.to_string(),
        sun_status(&summary.sun).to_string(),
        opt(pos.map(|p| p.x)),
        opt(pos.map(|p| p.y)),
        format!("{:.6}", summary.std_dev),
        format!("{:.6}", summary.threshold),
        summary.method.to_string(),
        summary.degenerate.to_string(),
        summary.samples.to_string(),
        opt(cover.total.cloud_fraction()),
        opt(cover.total.thin_fraction()),
        opt(cover.total.opaque_fraction()),
        opt(cover.region(Region::Outer).cloud_fraction()),
        opt(cover.region(Region::Horizon).cloud_fraction()),
        opt(cover.region(Region::Inner).cloud_fraction()),
        opt(cover.region(Region::Sun).cloud_fraction()),
        String::new(),
    ]
}

fn error_record(obs: &Observation, error: &str) -> Vec<String> {
    let mut record = vec![String::new(); HEADER.len()];
    record[0] = obs.image.display().to_string();
    record[1] = obs.azimuth.to_string();
    record[2] = obs.altitude.to_string();
    record[HEADER.len() - 1] = error.to_string();
    record
}

/// Write one row per outcome to any writer.
pub fn write_results_to<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for outcome in outcomes {
        let record = match &outcome.result {
            Ok(summary) => summary_record(&outcome.observation, summary),
            Err(e) => error_record(&outcome.observation, &e.to_string()),
        };
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the results table to `path`.
pub fn write_results(path: &Path, outcomes: &[BatchOutcome]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_results_to(file, outcomes)
}
