//! Equirectangular sky panoramas rendered with `nebula-atmosphere`.

pub mod day_night;
mod error;
pub mod panorama;

pub use error::SkyviewError;
pub use panorama::{Panorama, RenderSettings, RenderStats, render_panorama, render_panorama_serial};
