use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use skycover_core::io::manifest::{read_manifest, write_results};
use skycover_core::pipeline::{analyze_batch, ProgressReporter};
use tracing::info;

use super::load_config;
use crate::summary::print_batch_summary;

#[derive(Args)]
pub struct BatchArgs {
    /// CSV manifest with columns image, azimuth, altitude
    pub manifest: PathBuf,

    /// Instrument config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory image paths are resolved against [default: the manifest's directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Write the segmentation rasters of every image into this directory
    #[arg(long)]
    pub save_rasters: Option<PathBuf>,

    /// Number of worker threads [default: one per core]
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Results table (CSV)
    #[arg(short, long, default_value = "skycover.csv")]
    pub output: PathBuf,
}

struct BarReporter(ProgressBar);

impl ProgressReporter for BarReporter {
    fn begin(&self, total_items: usize) {
        self.0.set_length(total_items as u64);
    }

    fn advance(&self, _items_done: usize) {
        self.0.inc(1);
    }

    fn finish(&self) {
        self.0.finish_with_message("Done");
    }
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate().context("Instrument config rejected")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let observations = read_manifest(&args.manifest)
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;
    if observations.is_empty() {
        bail!("Manifest {} lists no images", args.manifest.display());
    }
    let base_dir = args
        .base_dir
        .as_deref()
        .or_else(|| args.manifest.parent())
        .unwrap_or(Path::new("."));
    info!(
        images = observations.len(),
        base_dir = %base_dir.display(),
        "Manifest loaded"
    );

    let pb = ProgressBar::new(observations.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Analyzing");
    let reporter = BarReporter(pb);

    let outcomes = analyze_batch(
        &config,
        &observations,
        base_dir,
        args.save_rasters.as_deref(),
        &reporter,
    );

    write_results(&args.output, &outcomes)
        .with_context(|| format!("Failed to write results to {}", args.output.display()))?;
    print_batch_summary(&outcomes, &args.output);

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed == outcomes.len() {
        bail!("All {failed} images failed");
    }
    Ok(())
}
