//! Errors surfaced by the panorama tool.

use nebula_config::ConfigError;

/// Anything that can stop a panorama from being produced.
#[derive(Debug, thiserror::Error)]
pub enum SkyviewError {
    /// Loading or validating the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Encoding or writing the PNG failed.
    #[error("failed to write panorama: {0}")]
    Image(#[from] image::ImageError),

    /// A render worker thread could not be spawned.
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// Width or height was zero.
    #[error("panorama size must be non-zero, got {width}x{height}")]
    EmptyImage {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
