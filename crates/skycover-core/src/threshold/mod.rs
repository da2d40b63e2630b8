pub mod histogram;
pub mod hybrid;
pub mod mce;

pub use histogram::Histogram;
pub use hybrid::{hybrid, select_threshold, HybridThreshold, ThresholdMethod};
pub use mce::{min_cross_entropy, MceResult};
