//! Renders an equirectangular sky panorama to a PNG.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p nebula-skyview -- --elevation 4 -o sunset.png`.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::Vec3;
use nebula_config::{CliArgs, Config, default_config_dir};
use nebula_skyview::day_night::{light_direction, sun_direction, sun_elevation_deg};
use nebula_skyview::{RenderSettings, SkyviewError, render_panorama};
use tracing::{error, info};

fn run(config: &Config) -> Result<(), SkyviewError> {
    let params = config.atmosphere.to_params()?;

    let eye = params.earth_center + Vec3::Y * (params.earth_radius + config.camera.altitude);
    let toward_sun = sun_direction(&config.sun);
    let light_dir = light_direction(toward_sun);
    info!(
        altitude = config.camera.altitude,
        sun_elevation = sun_elevation_deg(toward_sun),
        "Rendering sky"
    );

    let settings = RenderSettings {
        width: config.output.width,
        height: config.output.height,
        exposure: config.output.exposure,
    };

    let started = Instant::now();
    let panorama = render_panorama(&params, eye, light_dir, &settings, config.output.threads)?;
    info!(
        width = settings.width,
        height = settings.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        discarded = panorama.stats.discarded,
        mean_night = panorama.stats.mean_night,
        "Panorama rendered"
    );

    panorama.image.save(&config.output.path)?;
    info!(path = %config.output.path.display(), "Panorama written");
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(|| default_config_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    nebula_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}
