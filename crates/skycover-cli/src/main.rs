mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skycover", about = "Cloud cover analysis for all-sky camera images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment one sky image and report its cloud cover
    Analyze(commands::analyze::AnalyzeArgs),
    /// Analyze every image listed in a CSV manifest
    Batch(commands::batch::BatchArgs),
    /// Show where the sun lands in the image plane
    Sun(commands::sun::SunArgs),
    /// Print or save the default instrument config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Sun(args) => commands::sun::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
