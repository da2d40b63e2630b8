mod common;

use ndarray::Array3;
use skycover_core::config::ThresholdConfig;
use skycover_core::error::SkyCoverError;
use skycover_core::ratio::{normalized_ratio, ratio_array, ratio_field};
use skycover_core::threshold::hybrid::compute_mean_stddev;
use skycover_core::threshold::{hybrid, min_cross_entropy, select_threshold, ThresholdMethod};

use common::{gaussian_cluster, Lcg};

// ---------------------------------------------------------------------------
// Ratio extraction
// ---------------------------------------------------------------------------

#[test]
fn test_normalized_ratio_strictly_bounded() {
    for red in 1..=255u8 {
        for blue in 1..=255u8 {
            let v = normalized_ratio(red, blue).unwrap();
            assert!(v > -1.0 && v < 1.0, "r={red} b={blue} -> {v}");
        }
    }
}

#[test]
fn test_zero_channel_pixels_are_excluded() {
    let mut img = Array3::<u8>::zeros((2, 3, 3));
    // (0,0): valid grey -> 0.0 is kept as a real sample.
    img[[0, 0, 0]] = 100;
    img[[0, 0, 2]] = 100;
    // (0,1): red only.
    img[[0, 1, 0]] = 100;
    // (1,2): blue-heavy.
    img[[1, 2, 0]] = 50;
    img[[1, 2, 2]] = 150;

    let field = ratio_field(img.view()).unwrap();
    assert_eq!(field.sample_count(), 2);
    assert_eq!(field.values[[0, 1]], None);

    let ratios = ratio_array(img.view()).unwrap();
    assert_eq!(ratios, vec![0.0, 0.5]);
}

#[test]
fn test_large_image_takes_parallel_path_with_same_result() {
    let img = Array3::from_shape_fn((300, 300, 3), |(r, c, ch)| match ch {
        0 => ((r * 7 + c) % 255) as u8,
        1 => 0,
        _ => ((r + c * 3) % 255) as u8,
    });
    let field = ratio_field(img.view()).unwrap();
    for ((row, col), v) in field.values.indexed_iter() {
        assert_eq!(*v, normalized_ratio(img[[row, col, 0]], img[[row, col, 2]]));
    }
}

// ---------------------------------------------------------------------------
// Minimum cross-entropy
// ---------------------------------------------------------------------------

#[test]
fn test_mce_is_deterministic() {
    let mut rng = Lcg::new(7);
    let mut data = gaussian_cluster(&mut rng, 0.0, 0.05, 3000);
    data.extend(gaussian_cluster(&mut rng, 0.4, 0.05, 3000));

    let a = min_cross_entropy(&data, 100).unwrap();
    let b = min_cross_entropy(&data, 100).unwrap();
    assert_eq!(a.threshold, b.threshold);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.scores.len(), 98);
}

#[test]
fn test_mce_threshold_between_gaussian_clusters() {
    let cases = [
        (42, -0.1, 0.03, 2000, 0.35, 0.03, 2000),
        (43, -0.1, 0.03, 500, 0.35, 0.03, 3000),
        (44, 0.05, 0.02, 3000, 0.4, 0.03, 1000),
    ];
    for (seed, m1, s1, n1, m2, s2, n2) in cases {
        let mut rng = Lcg::new(seed);
        let mut data = gaussian_cluster(&mut rng, m1, s1, n1);
        data.extend(gaussian_cluster(&mut rng, m2, s2, n2));

        let result = min_cross_entropy(&data, 100).unwrap();
        assert!(
            result.threshold > m1 && result.threshold < m2,
            "seed {seed}: threshold {} not in ({m1}, {m2})",
            result.threshold
        );
        assert_eq!(result.threshold, result.histogram.edges[result.best_index]);
    }
}

#[test]
fn test_mce_picks_first_minimum_on_ties() {
    let data = [0.0, 0.0, 1.0, 1.0];
    let result = min_cross_entropy(&data, 4).unwrap();
    let min = result
        .scores
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let first = result.scores.iter().position(|&s| s == min).unwrap();
    assert_eq!(result.best_index, first);
}

#[test]
fn test_mce_flags_non_positive_threshold() {
    // Two spikes at 0 and 0.5: the lowest edge wins and sits at 0.
    let mut data = vec![0.0; 200];
    data.extend(vec![0.5; 200]);
    let result = min_cross_entropy(&data, 100).unwrap();
    assert!(result.threshold <= 0.0);
    assert!(result.degenerate);
    assert_eq!(result.histogram.total(), 400);
}

// ---------------------------------------------------------------------------
// Hybrid policy
// ---------------------------------------------------------------------------

#[test]
fn test_population_std_dev() {
    let (mean, std) = compute_mean_stddev(&[-0.5, 0.5]);
    assert_eq!(mean, 0.0);
    assert_eq!(std, 0.5);
}

#[test]
fn test_dispersion_boundary_selects_fixed() {
    let config = ThresholdConfig {
        fixed_threshold: 0.2,
        dispersion_threshold: 0.5,
        bins: 100,
    };
    let result = select_threshold(vec![-0.5, 0.5], &config).unwrap();
    assert_eq!(result.std_dev, 0.5);
    assert_eq!(result.method, ThresholdMethod::Fixed);
    assert_eq!(result.threshold, 0.2);
    assert!(result.mce.is_none());
}

#[test]
fn test_wide_spread_selects_mce() {
    let mut rng = Lcg::new(42);
    let mut data = gaussian_cluster(&mut rng, -0.1, 0.03, 2000);
    data.extend(gaussian_cluster(&mut rng, 0.35, 0.03, 2000));
    let config = ThresholdConfig::default();

    let result = select_threshold(data.clone(), &config).unwrap();
    assert_eq!(result.method, ThresholdMethod::MinCrossEntropy);
    assert!(result.std_dev > config.dispersion_threshold);
    let mce = result.mce.as_ref().unwrap();
    assert_eq!(result.threshold, mce.threshold);
    assert_eq!(result.ratios, data);
}

#[test]
fn test_empty_ratio_array_rejected() {
    let err = select_threshold(Vec::new(), &ThresholdConfig::default()).unwrap_err();
    assert!(matches!(err, SkyCoverError::EmptyRatioArray));
}

#[test]
fn test_hybrid_on_image_skips_zero_pixels() {
    let mut img = Array3::<u8>::zeros((4, 4, 3));
    for col in 0..4 {
        img[[1, col, 0]] = 100;
        img[[1, col, 2]] = 100;
    }
    let result = hybrid(img.view(), &ThresholdConfig::default()).unwrap();
    assert_eq!(result.ratios.len(), 4);
    assert_eq!(result.std_dev, 0.0);
    assert_eq!(result.method, ThresholdMethod::Fixed);

    let black = Array3::<u8>::zeros((4, 4, 3));
    assert!(matches!(
        hybrid(black.view(), &ThresholdConfig::default()),
        Err(SkyCoverError::EmptyRatioArray)
    ));
}

#[test]
fn test_constant_data_selects_empty_group_split() {
    // Range is 0.25 +/- 0.5; the last split leaves the high group empty.
    let result = min_cross_entropy(&[0.25; 50], 10).unwrap();
    assert_eq!(result.scores.len(), 8);
    assert!(result.scores[7].is_nan());
    assert!(result.scores[..7].iter().all(|s| s.is_finite()));
    assert_eq!(result.best_index, 7);
    assert_eq!(result.threshold, result.histogram.edges[7]);
    assert!((result.threshold - 0.45).abs() < 1e-12);
    assert!(!result.degenerate);
}

#[test]
fn test_negative_dispersion_forces_mce_on_constant_data() {
    let config = ThresholdConfig {
        fixed_threshold: 0.2,
        dispersion_threshold: -1.0,
        bins: 10,
    };
    let result = select_threshold(vec![0.25; 50], &config).unwrap();
    assert_eq!(result.method, ThresholdMethod::MinCrossEntropy);
    assert!((result.threshold - 0.45).abs() < 1e-12);
}
