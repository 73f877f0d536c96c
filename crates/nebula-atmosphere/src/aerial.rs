//! Fixed-step aerial-perspective integral along a finite view segment.

use glam::Vec3;

use crate::optical_depth::compute_optical_depth;
use crate::params::ScatteringParams;

/// Number of integration steps along the view segment.
pub const NUM_SAMPLES_SUN: u32 = 16;

/// Camera-side extinction and single-scattering integrals over one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AerialPerspective {
    /// Extinction accumulated along the segment.
    pub transmittance: Vec3,
    /// Mie in-scattering integral, before coefficient and phase weighting.
    pub insctr_mie: Vec3,
    /// Rayleigh in-scattering integral, before coefficient and phase weighting.
    pub insctr_rayleigh: Vec3,
}

/// Integrate transmittance and in-scattering from `end` back toward `start`.
///
/// `start` and `end` are planet-centered. `infinite` is `true` when the
/// segment runs out to the atmosphere top and `false` when the ground
/// truncates it; see [`compute_optical_depth`].
///
/// The single scattering integral is wavelength-independent at this stage, so
/// both in-scattering channels carry the same vector.
pub fn aerial_perspective(
    params: &ScatteringParams,
    start: Vec3,
    end: Vec3,
    view_dir: Vec3,
    light_dir: Vec3,
    infinite: bool,
) -> AerialPerspective {
    let neg = if infinite { 1.0 } else { -1.0 };

    let sample_step = (end - start) / NUM_SAMPLES_SUN as f32;
    let sample_length = sample_step.length();
    let lambda = params.extinction();

    let mut sample_point = end - sample_step;
    let mut last_depth = compute_optical_depth(params, end, view_dir, light_dir, neg);

    let mut transmittance = Vec3::ONE;
    let mut scattering = Vec3::ZERO;

    for _ in 0..NUM_SAMPLES_SUN {
        let depth = compute_optical_depth(params, sample_point, view_dir, light_dir, neg);

        let segment_s = (-lambda * ((depth.sun + last_depth.sun) * 0.5)).exp();
        let segment_t = (-lambda * (depth.camera - last_depth.camera)).exp();

        transmittance *= segment_t;

        let density = (-(sample_point.length() - params.earth_radius) / params.rayleigh_height).exp();
        scattering = scattering * segment_t + density * segment_s * sample_length;

        sample_point -= sample_step;
        last_depth = depth;
    }

    AerialPerspective {
        transmittance,
        insctr_mie: scattering,
        insctr_rayleigh: scattering,
    }
}
