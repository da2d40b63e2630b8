use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyCoverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image is {width}x{height}x{channels}, expected at least {expected_width}x{expected_height}x3")]
    DimensionMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("Sun position unresolvable at altitude {altitude_deg}\u{b0}: discriminant {discriminant} < 0")]
    GeometryDomain { altitude_deg: f64, discriminant: f64 },

    #[error("Non-finite normalized ratio at pixel ({row}, {col})")]
    NonFiniteRatio { row: usize, col: usize },

    #[error("No valid ratio samples in the field of view")]
    EmptyRatioArray,
}

pub type Result<T> = std::result::Result<T, SkyCoverError>;
