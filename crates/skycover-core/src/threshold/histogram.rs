use crate::error::{Result, SkyCoverError};

/// Equal-width histogram over the data's own range.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub counts: Vec<u64>,
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Bin `data` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The maximum falls in the last bin. A constant input is spread over
    /// `[v - 0.5, v + 0.5]` so the bins keep a non-zero width.
    pub fn equal_width(data: &[f64], bins: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(SkyCoverError::EmptyRatioArray);
        }
        if bins == 0 {
            return Err(SkyCoverError::InvalidConfig(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let mut lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let span = hi - lo;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + span * i as f64 / bins as f64).collect();
        edges[bins] = hi;

        let scale = bins as f64 / span;
        let mut counts = vec![0u64; bins];
        for &v in data {
            let mut idx = (((v - lo) * scale) as usize).min(bins - 1);
            // Floating-point slop near an edge: settle against the edges.
            if idx > 0 && v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Ok(Self { counts, edges })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_lands_in_last_bin() {
        let hist = Histogram::equal_width(&[0.0, 0.25, 0.5, 0.75, 1.0], 4).unwrap();
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.edges, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_constant_data_gets_unit_range() {
        let hist = Histogram::equal_width(&[0.3; 10], 5).unwrap();
        assert!((hist.edges[0] + 0.2).abs() < 1e-12);
        assert!((hist.edges[5] - 0.8).abs() < 1e-12);
        assert_eq!(hist.counts, vec![0, 0, 10, 0, 0]);
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(matches!(
            Histogram::equal_width(&[], 10),
            Err(SkyCoverError::EmptyRatioArray)
        ));
    }
}
