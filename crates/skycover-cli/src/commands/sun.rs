use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skycover_core::observation::SolarPosition;
use skycover_core::projection::{discriminant, sun_position};

use super::load_config;

#[derive(Args)]
pub struct SunArgs {
    /// Solar azimuth in degrees from North
    #[arg(long)]
    pub azimuth: f64,

    /// Solar altitude in degrees above the horizon
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: f64,

    /// Instrument config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Print the mirror projection of one solar position.
pub fn run(args: &SunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate().context("Instrument config rejected")?;

    let solar = SolarPosition::new(args.azimuth, args.altitude);
    let (cx, cy) = config.center();

    println!("Azimuth:       {:.2}\u{b0}", solar.azimuth_deg);
    println!("Altitude:      {:.2}\u{b0}", solar.altitude_deg);
    println!("Theta:         {:.4} rad", solar.theta());
    println!("Centre:        ({cx:.0}, {cy:.0})");
    println!(
        "Discriminant:  {:.6}",
        discriminant(&config.mirror, solar.altitude_deg)
    );

    match sun_position(&config, solar.altitude_deg, solar.theta()) {
        Ok(pos) => {
            println!("Radius:        {:.2} px", pos.radius);
            println!("Sun centre:    ({:.2}, {:.2})", pos.x, pos.y);
            if pos.radius > config.regions.outer_radius {
                println!("Note:          sun centre lies outside the field of view");
            }
        }
        Err(e) => println!("Sun centre:    unresolved ({e})"),
    }

    if solar.altitude_deg < config.sun.minimum_altitude_deg {
        println!(
            "Note:          below the {:.1}\u{b0} minimum altitude, no sun disk is drawn",
            config.sun.minimum_altitude_deg
        );
    }

    Ok(())
}
