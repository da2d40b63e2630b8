//! Minimum cross-entropy (MCE) threshold selection.
//!
//! For every split `k` in `2..L` the histogram is cut into a low group
//! `[1, k)` and a high group `[k, L)`. Each group contributes
//! `-m * log10(mu)`, where `m = sum(i * hist[i])` over the group and
//! `mu = m / sum(hist[i])` is its bin-index-weighted mean. The threshold is
//! the bin edge at the position of the smallest score.
//!
//! Two behaviors are kept for compatibility with existing sky-cover
//! records, and are known sharp edges:
//! - an empty `hist[1]` or `hist[L-2]` is counted as 1 so neither group can
//!   be empty;
//! - the edge is indexed by the position in the score list (`k - 2`), and
//!   ties go to the first minimum.
//!
//! A group that is still empty (possible when the data is constant) scores
//! NaN. A NaN score wins outright: the first NaN position is selected, the
//! same as an argmin that propagates NaN.

use tracing::{debug, warn};

use crate::error::{Result, SkyCoverError};

use super::histogram::Histogram;

/// Outcome of an MCE run.
#[derive(Clone, Debug, PartialEq)]
pub struct MceResult {
    pub threshold: f64,
    /// Score of every candidate split, starting at `k = 2`.
    pub scores: Vec<f64>,
    /// Position of the minimum in `scores`.
    pub best_index: usize,
    /// Histogram as binned, before the empty-boundary patch.
    pub histogram: Histogram,
    /// `threshold <= 0`: the histogram is probably too narrow to trust.
    pub degenerate: bool,
}

/// Score every split of `counts` (already boundary-patched).
pub fn cross_entropy_scores(counts: &[u64]) -> Vec<f64> {
    let l = counts.len();
    (2..l)
        .map(|k| group_entropy(&counts[1..k], 1) + group_entropy(&counts[k..l], k))
        .collect()
}

/// `-m * log10(m / n)` for a run of bins whose first index is `first`.
fn group_entropy(counts: &[u64], first: usize) -> f64 {
    let (m, n) = counts
        .iter()
        .enumerate()
        .fold((0.0f64, 0.0f64), |(m, n), (offset, &c)| {
            (m + (first + offset) as f64 * c as f64, n + c as f64)
        });
    let mu = m / n;
    -m * mu.log10()
}

/// Position of the first minimum; the first NaN if any score is NaN.
fn argmin(scores: &[f64]) -> usize {
    if let Some(nan) = scores.iter().position(|s| s.is_nan()) {
        return nan;
    }
    scores
        .iter()
        .enumerate()
        .fold(0, |best, (i, &s)| if s < scores[best] { i } else { best })
}

/// Run MCE over `data` with `bins` histogram bins.
pub fn min_cross_entropy(data: &[f64], bins: usize) -> Result<MceResult> {
    if bins < 3 {
        return Err(SkyCoverError::InvalidConfig(format!(
            "minimum cross-entropy needs at least 3 bins, got {bins}"
        )));
    }
    let histogram = Histogram::equal_width(data, bins)?;

    let mut counts = histogram.counts.clone();
    let l = counts.len();
    if counts[1] == 0 {
        counts[1] = 1;
    }
    if counts[l - 2] == 0 {
        counts[l - 2] = 1;
    }

    let scores = cross_entropy_scores(&counts);
    let best_index = argmin(&scores);
    let threshold = histogram.edges[best_index];
    let degenerate = threshold <= 0.0;

    if degenerate {
        warn!(
            threshold,
            histogram = ?histogram.counts,
            "MCE threshold is not positive; histogram may be degenerate"
        );
    } else {
        debug!(threshold, split = best_index + 2, "MCE threshold selected");
    }

    Ok(MceResult {
        threshold,
        scores,
        best_index,
        histogram,
        degenerate,
    })
}
