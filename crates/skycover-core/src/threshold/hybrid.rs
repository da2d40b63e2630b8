use ndarray::ArrayView3;
use tracing::info;

use crate::config::ThresholdConfig;
use crate::error::{Result, SkyCoverError};
use crate::ratio::ratio_array;

use super::mce::{min_cross_entropy, MceResult};

/// Which path of the hybrid policy produced the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdMethod {
    Fixed,
    MinCrossEntropy,
}

impl std::fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::MinCrossEntropy => write!(f, "mce"),
        }
    }
}

/// Ratio array, its spread, and the threshold chosen for it.
#[derive(Clone, Debug)]
pub struct HybridThreshold {
    pub ratios: Vec<f64>,
    pub std_dev: f64,
    pub threshold: f64,
    pub method: ThresholdMethod,
    /// Full MCE diagnostics when that path was taken.
    pub mce: Option<MceResult>,
}

impl HybridThreshold {
    /// MCE ran and produced a threshold `<= 0`.
    pub fn is_degenerate(&self) -> bool {
        self.mce.as_ref().is_some_and(|m| m.degenerate)
    }
}

/// Compute mean and population standard deviation.
pub fn compute_mean_stddev(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Choose between the fixed threshold and MCE based on the ratio spread.
///
/// A spread at or below `dispersion_threshold` means the histogram is too
/// narrow for MCE; the fixed threshold is used instead.
pub fn select_threshold(ratios: Vec<f64>, config: &ThresholdConfig) -> Result<HybridThreshold> {
    if ratios.is_empty() {
        return Err(SkyCoverError::EmptyRatioArray);
    }
    let (_, std_dev) = compute_mean_stddev(&ratios);

    let (threshold, method, mce) = if std_dev <= config.dispersion_threshold {
        (config.fixed_threshold, ThresholdMethod::Fixed, None)
    } else {
        let result = min_cross_entropy(&ratios, config.bins)?;
        (result.threshold, ThresholdMethod::MinCrossEntropy, Some(result))
    };

    info!(
        samples = ratios.len(),
        std_dev,
        threshold,
        method = %method,
        "Threshold selected"
    );

    Ok(HybridThreshold {
        ratios,
        std_dev,
        threshold,
        method,
        mce,
    })
}

/// Extract the ratio array of a masked image and threshold it.
pub fn hybrid(image: ArrayView3<u8>, config: &ThresholdConfig) -> Result<HybridThreshold> {
    select_threshold(ratio_array(image)?, config)
}
