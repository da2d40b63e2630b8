use std::path::Path;

use console::Style;
use skycover_core::io::manifest::Observation;
use skycover_core::observation::SolarPosition;
use skycover_core::pipeline::{BatchOutcome, ImageSummary};
use skycover_core::regions::builder::SunPlacement;
use skycover_core::skycover::CoverCounts;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    warning: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warning: Style::new().dim().yellow(),
            error: Style::new().red(),
            path: Style::new().underlined(),
        }
    }
}

fn percent(fraction: Option<f64>) -> String {
    fraction
        .map(|f| format!("{:.1}%", f * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn print_image_summary(file: &Path, solar: &SolarPosition, summary: &ImageSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Sky Cover"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Sun"),
        s.value.apply_to(format!(
            "az {:.1}\u{b0}  alt {:.1}\u{b0}",
            solar.azimuth_deg, solar.altitude_deg
        ))
    );
    let placement = match summary.sun {
        SunPlacement::Placed(_) => s.value.apply_to(summary.sun.to_string()),
        _ => s.warning.apply_to(summary.sun.to_string()),
    };
    println!("  {:<14}{}", s.label.apply_to("Sun disk"), placement);
    println!();

    // Threshold
    println!("  {}", s.header.apply_to("Threshold"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(summary.method)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Value"),
        s.value.apply_to(format!("{:.4}", summary.threshold))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Std dev"),
        s.value.apply_to(format!("{:.4}", summary.std_dev))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(summary.samples)
    );
    if summary.degenerate {
        println!(
            "    {}",
            s.warning
                .apply_to("threshold is not positive; histogram may be degenerate")
        );
    }
    println!();

    // Cover
    println!("  {}", s.header.apply_to("Cloud Cover"));
    print_cover_row(&s, "Total", &summary.sky_cover.total);
    for (region, counts) in &summary.sky_cover.regions {
        print_cover_row(&s, &region.to_string(), counts);
    }
    println!();
}

fn print_cover_row(s: &Styles, name: &str, counts: &CoverCounts) {
    if counts.total() == 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to(name),
            s.warning.apply_to("no samples")
        );
        return;
    }
    println!(
        "    {:<12}{}  {}",
        s.label.apply_to(name),
        s.value.apply_to(format!("{:>6}", percent(counts.cloud_fraction()))),
        s.label.apply_to(format!(
            "(thin {}, opaque {}, {} px)",
            percent(counts.thin_fraction()),
            percent(counts.opaque_fraction()),
            counts.total()
        ))
    );
}

pub fn print_batch_summary(outcomes: &[BatchOutcome], output: &Path) {
    let s = Styles::new();
    let failures: Vec<(&Observation, String)> = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().err().map(|e| (&o.observation, e.to_string())))
        .collect();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Analyzed"),
        s.value.apply_to(outcomes.len() - failures.len())
    );
    if !failures.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.error.apply_to(failures.len())
        );
        for (obs, error) in &failures {
            println!(
                "    {}  {}",
                s.path.apply_to(obs.image.display()),
                s.error.apply_to(error)
            );
        }
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Results"),
        s.path.apply_to(output.display())
    );
    println!();
}
