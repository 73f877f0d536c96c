//! Command-line argument parsing for the sky renderer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Nebula sky renderer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "nebula-skyview", about = "Render a physically-based sky panorama")]
pub struct CliArgs {
    /// Panorama width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Panorama height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Time of day in [0, 1): 0 = midnight, 0.5 = noon.
    #[arg(long)]
    pub time_of_day: Option<f64>,

    /// Sun elevation in degrees (overrides time of day).
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f32>,

    /// Sun azimuth in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f32>,

    /// Eye altitude above the surface.
    #[arg(long)]
    pub altitude: Option<f32>,

    /// Atmospheric turbidity; derives scattering coefficients from wavelengths.
    #[arg(long)]
    pub turbidity: Option<f32>,

    /// Exposure applied before tonemapping.
    #[arg(long)]
    pub exposure: Option<f32>,

    /// Output PNG path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Worker thread count (0 = one per core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.output.width = w;
        }
        if let Some(h) = args.height {
            self.output.height = h;
        }
        if let Some(t) = args.time_of_day {
            self.sun.time_of_day = t;
        }
        if let Some(elevation) = args.elevation {
            self.sun.elevation_deg = Some(elevation);
        }
        if let Some(azimuth) = args.azimuth {
            self.sun.azimuth_deg = azimuth;
        }
        if let Some(altitude) = args.altitude {
            self.camera.altitude = altitude;
        }
        if let Some(turbidity) = args.turbidity {
            self.atmosphere.turbidity = Some(turbidity);
        }
        if let Some(exposure) = args.exposure {
            self.output.exposure = exposure;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(threads) = args.threads {
            self.output.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
