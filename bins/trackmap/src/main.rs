//! trackmap - replay saved dashboard data frames through the track map core
//!
//! Reads the series a dashboard host would deliver to the panel and shows
//! what the panel would build, draw and report.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use trackmap_telemetry::TelemetryConfig;

mod commands;
mod config;

use commands::{build, destination, nearest, render, select};
use config::Config;

/// Inspect vessel track map panels offline
#[derive(Parser)]
#[command(name = "trackmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Config file (defaults to .trackmap.toml, trackmap.toml or the user config dir)
    #[arg(short, long, global = true, env = "TRACKMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Print collected metrics as JSON on stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a track from a data frame and summarize it
    Build {
        /// JSON file with the host's series list ("-" for stdin)
        frame: PathBuf,

        /// Expect the anchor series regardless of config
        #[arg(long, conflicts_with = "no_anchor")]
        anchor: bool,

        /// Expect no anchor series regardless of config
        #[arg(long)]
        no_anchor: bool,
    },

    /// Find the sample shown for a hover at a given time
    Nearest {
        /// JSON file with the host's series list ("-" for stdin)
        frame: PathBuf,

        /// Epoch milliseconds or an RFC 3339 timestamp
        time: String,
    },

    /// Time range covered by a box-zoom selection
    Select {
        /// JSON file with the host's series list ("-" for stdin)
        frame: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        south: f64,

        #[arg(long, allow_negative_numbers = true)]
        west: f64,

        #[arg(long, allow_negative_numbers = true)]
        north: f64,

        #[arg(long, allow_negative_numbers = true)]
        east: f64,
    },

    /// Show the overlays the panel would draw
    Render {
        /// JSON file with the host's series list ("-" for stdin)
        frame: PathBuf,
    },

    /// Point reached from a position along a bearing
    Destination {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Compass bearing in degrees
        #[arg(long, allow_negative_numbers = true)]
        bearing: f64,

        /// Distance in meters
        #[arg(long, default_value_t = 50.0)]
        distance: f64,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = if cli.verbose {
        TelemetryConfig {
            format: config.file.telemetry.format,
            ..TelemetryConfig::verbose()
        }
    } else {
        config.file.telemetry.clone()
    };
    trackmap_telemetry::init_with_config(telemetry)?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded config");
    }

    let result = match cli.command {
        Commands::Build {
            frame,
            anchor,
            no_anchor,
        } => {
            let with_anchor = match (anchor, no_anchor) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            build::run(&frame, &config, with_anchor, cli.format)
        }
        Commands::Nearest { frame, time } => nearest::run(&frame, &time, &config, cli.format),
        Commands::Select {
            frame,
            south,
            west,
            north,
            east,
        } => select::run(&frame, [south, west, north, east], &config, cli.format),
        Commands::Render { frame } => render::run(&frame, &config, cli.format),
        Commands::Destination {
            lat,
            lng,
            bearing,
            distance,
        } => destination::run(lat, lng, bearing, distance, cli.format),
    };

    if cli.metrics {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&trackmap_telemetry::metrics().export_json())?
        );
    }

    result
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
