//! Chapman-approximated atmospheric scattering for a single view ray.
//!
//! The pipeline is four pure stages: ray/sphere intersection against the
//! planet and the atmosphere top, the Chapman optical-depth approximation,
//! a fixed-step aerial-perspective integral, and Mie/Rayleigh phase
//! composition into an RGB radiance plus a night-fade factor.
//!
//! Everything here is a pure function of [`ScatteringParams`] and the ray,
//! so calls can be spread across any number of threads without coordination.

mod aerial;
mod error;
mod intersect;
mod optical_depth;
mod params;
mod phase;
mod sky;
pub mod wavelength;

pub use aerial::{AerialPerspective, NUM_SAMPLES_SUN, aerial_perspective};
pub use error::AtmosphereError;
pub use intersect::{RaySphereHit, ray_sphere_intersection};
pub use optical_depth::{
    OpticalDepth, chapman_approximation, compute_optical_depth, optical_depth_schueler,
    transmittance,
};
pub use params::ScatteringParams;
pub use phase::{
    CornetteShanksPhase, PhaseFunctions, StandardPhase, cornette_shanks, henyey_greenstein,
    rayleigh_phase,
};
pub use sky::{
    EPSILON, SkyInscattering, SkyboxChapman, compute_sky_inscattering,
    compute_sky_inscattering_with, compute_skybox_chapman,
};
