use skycover_core::config::{InstrumentConfig, PixelRect};
use skycover_core::error::SkyCoverError;
use skycover_core::regions::palette::RegionStyle;

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_toml_round_trip() {
    let config = InstrumentConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: InstrumentConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r#"
        [resolution]
        width = 640
        height = 480

        [threshold]
        fixed_threshold = 0.15
    "#;
    let config: InstrumentConfig = toml::from_str(text).unwrap();
    config.validate().unwrap();

    assert_eq!(config.resolution.width, 640);
    assert_eq!(config.resolution.channels, 3);
    assert_eq!(config.threshold.fixed_threshold, 0.15);
    assert_eq!(config.threshold.bins, 100);
    assert_eq!(config.regions, InstrumentConfig::default().regions);
    assert_eq!(config.center(), (320.0, 240.0));
}

#[test]
fn test_missing_resolution_fails_to_parse() {
    let text = r#"
        [threshold]
        fixed_threshold = 0.15
    "#;
    assert!(toml::from_str::<InstrumentConfig>(text).is_err());
}

#[test]
fn test_custom_arms_parse() {
    let text = r#"
        [resolution]
        width = 352
        height = 288

        [occlusion]
        arms = [{ x0 = 10, y0 = 20, x1 = 30, y1 = 5 }]
    "#;
    let config: InstrumentConfig = toml::from_str(text).unwrap();
    assert_eq!(config.occlusion.arms, vec![PixelRect::new(10, 20, 30, 5)]);
    assert_eq!(config.occlusion.band_thickness, 35.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_invalid(config: &InstrumentConfig) {
    assert!(
        matches!(config.validate(), Err(SkyCoverError::InvalidConfig(_))),
        "expected InvalidConfig for {config:?}"
    );
}

#[test]
fn test_rejects_bad_channels() {
    let mut config = InstrumentConfig::default();
    config.resolution.channels = 4;
    assert_invalid(&config);
}

#[test]
fn test_rejects_bad_radii() {
    let mut config = InstrumentConfig::default();
    config.regions.sun_radius = 0.0;
    assert_invalid(&config);

    let mut config = InstrumentConfig::default();
    config.regions.mirror_radius = f64::NAN;
    assert_invalid(&config);
}

#[test]
fn test_rejects_horizon_width_out_of_range() {
    let mut config = InstrumentConfig::default();
    config.regions.horizon_width_deg = 361.0;
    assert_invalid(&config);
    config.regions.horizon_width_deg = -1.0;
    assert_invalid(&config);
}

#[test]
fn test_rejects_flat_mirror() {
    let mut config = InstrumentConfig::default();
    config.mirror.slope = 0.0;
    assert_invalid(&config);
}

#[test]
fn test_rejects_palette_collisions() {
    let mut config = InstrumentConfig::default();
    config.palette.sun.label = config.palette.outer.label;
    assert_invalid(&config);

    let mut config = InstrumentConfig::default();
    config.palette.inner = RegionStyle {
        label: 0,
        ..config.palette.inner
    };
    assert_invalid(&config);

    let mut config = InstrumentConfig::default();
    config.palette.horizon.color = [0, 0, 0];
    assert_invalid(&config);
}

#[test]
fn test_rejects_too_few_bins_and_negative_band() {
    let mut config = InstrumentConfig::default();
    config.threshold.bins = 2;
    assert_invalid(&config);

    let mut config = InstrumentConfig::default();
    config.classification.thin_band = -0.1;
    assert_invalid(&config);
}
