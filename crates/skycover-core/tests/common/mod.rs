#![allow(dead_code)]

use ndarray::Array3;
use skycover_core::config::InstrumentConfig;

/// Grey cloud pixel; blue varies slightly with the column.
pub fn cloud_pixel(col: usize) -> [u8; 3] {
    [200, 200, 190 + (col % 26) as u8]
}

/// Blue sky pixel; blue varies with the column.
pub fn clear_pixel(col: usize) -> [u8; 3] {
    [60, 120, 150 + (col % 61) as u8]
}

/// Photograph with cloud left of `split_col` and clear sky to the right.
pub fn split_sky(height: usize, width: usize, split_col: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(_, col, ch)| {
        if col < split_col {
            cloud_pixel(col)[ch]
        } else {
            clear_pixel(col)[ch]
        }
    })
}

/// Photograph of a single color.
pub fn uniform_sky(height: usize, width: usize, rgb: [u8; 3]) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(_, _, ch)| rgb[ch])
}

pub fn default_config() -> InstrumentConfig {
    let config = InstrumentConfig::default();
    config.validate().expect("default config is valid");
    config
}

/// Deterministic 64-bit LCG returning uniforms in [0, 1).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximately normal sample (Irwin-Hall, 12 uniforms).
    pub fn next_normal(&mut self, mean: f64, sigma: f64) -> f64 {
        let z: f64 = (0..12).map(|_| self.next_f64()).sum::<f64>() - 6.0;
        mean + sigma * z
    }
}

pub fn gaussian_cluster(rng: &mut Lcg, mean: f64, sigma: f64, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.next_normal(mean, sigma)).collect()
}
