mod common;

use approx::assert_abs_diff_eq;
use skycover_core::config::MirrorModel;
use skycover_core::error::SkyCoverError;
use skycover_core::observation::SolarPosition;
use skycover_core::projection::{discriminant, radial_distance, sun_position};

use common::default_config;

#[test]
fn test_due_south_at_45_degrees_inside_outer_disk() {
    let config = default_config();
    let solar = SolarPosition::new(180.0, 45.0);
    let pos = sun_position(&config, solar.altitude_deg, solar.theta()).unwrap();

    assert!(pos.x.is_finite() && pos.y.is_finite());
    let (cx, cy) = config.center();
    let dist = ((pos.x - cx).powi(2) + (pos.y - cy).powi(2)).sqrt();
    assert!(dist < config.regions.outer_radius, "dist = {dist}");
    // Due South is straight down in the image.
    assert!((pos.x - cx).abs() < 1e-9);
    assert!(pos.y > cy);
    assert_abs_diff_eq!(pos.radius, 70.96, epsilon = 0.01);
}

#[test]
fn test_low_sun_still_resolves_with_default_mirror() {
    let config = default_config();
    let pos = sun_position(&config, 5.0, 0.0).unwrap();
    assert!(pos.radius.is_finite());
    assert!(pos.radius > 0.0);
    assert!((pos.y - 144.0).abs() < 1e-9);
}

#[test]
fn test_discriminant_sign_boundary() {
    // With a*c > 0 the discriminant tan^2(alt) - 4ac crosses zero at
    // tan(alt) = sqrt(4ac) = sqrt(1.15), about 47.0 degrees.
    let mirror = MirrorModel {
        slope: 0.23,
        intercept: 1.25,
    };
    let boundary = (4.0f64 * 0.23 * 1.25).sqrt().atan().to_degrees();
    let below = boundary - 0.01;
    let above = boundary + 0.01;

    assert!(discriminant(&mirror, below) < 0.0);
    assert!(discriminant(&mirror, above) > 0.0);

    match radial_distance(&mirror, 140.0, below) {
        Err(SkyCoverError::GeometryDomain {
            altitude_deg,
            discriminant,
        }) => {
            assert_eq!(altitude_deg, below);
            assert!(discriminant < 0.0);
        }
        other => panic!("expected GeometryDomain, got {other:?}"),
    }
    let r = radial_distance(&mirror, 140.0, above).unwrap();
    assert!(r.is_finite());
}

#[test]
fn test_azimuth_rotates_position() {
    let config = default_config();
    let east = sun_position(&config, 30.0, SolarPosition::new(90.0, 30.0).theta()).unwrap();
    let west = sun_position(&config, 30.0, SolarPosition::new(270.0, 30.0).theta()).unwrap();
    let (cx, _) = config.center();
    assert!(east.x > cx);
    assert!(west.x < cx);
    assert_abs_diff_eq!(east.radius, west.radius, epsilon = 1e-12);
}
