//! Configuration for the Nebula sky renderer.
//!
//! Settings persist to disk as RON files, can be overridden from the command
//! line via clap, and convert into the [`ScatteringParams`] block consumed by
//! `nebula-atmosphere`.
//!
//! [`ScatteringParams`]: nebula_atmosphere::ScatteringParams

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AtmosphereConfig, CameraConfig, Config, DebugConfig, OutputConfig, SunConfig,
    default_config_dir,
};
pub use error::ConfigError;
