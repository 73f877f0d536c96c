//! Scattering coefficients derived from the sampled wavelengths.
//!
//! Both functions take wavelengths in metres and return coefficients per metre.

use std::f32::consts::PI;

use glam::Vec3;

/// Default R, G, B sampling wavelengths in nanometres.
pub const DEFAULT_WAVELENGTHS_NM: Vec3 = Vec3::new(680.0, 550.0, 440.0);

/// Per-channel Mie `K` factors for the default wavelengths.
pub const MIE_K: Vec3 = Vec3::new(0.686, 0.678, 0.666);

/// Junge exponent of the aerosol size distribution.
pub const JUNGE_EXPONENT: f32 = 4.0;

/// Refractive index of air at sea level.
const AIR_INDEX: f32 = 1.0003;
/// Molecular number density at sea level (1/m^3).
const MOLECULAR_DENSITY: f32 = 2.545e25;
/// Depolarization factor of air.
const DEPOLARIZATION: f32 = 0.035;

/// Rayleigh scattering coefficients for molecular air.
pub fn rayleigh_coefficients(lambda: Vec3) -> Vec3 {
    let n2 = AIR_INDEX * AIR_INDEX;
    let king = (6.0 + 3.0 * DEPOLARIZATION) / (6.0 - 7.0 * DEPOLARIZATION);
    let constant = 8.0 * PI * PI * PI * (n2 - 1.0) * (n2 - 1.0) / (3.0 * MOLECULAR_DENSITY) * king;
    let lambda2 = lambda * lambda;
    Vec3::splat(constant) / (lambda2 * lambda2)
}

/// Mie scattering coefficients from atmospheric turbidity.
///
/// Turbidity 1 is a perfectly clear sky; the aerosol concentration grows
/// linearly from there.
pub fn mie_coefficients(lambda: Vec3, k: Vec3, turbidity: f32, junge: f32) -> Vec3 {
    let concentration = (0.6544 * turbidity - 0.6510) * 1e-16;
    let size_term = (Vec3::splat(2.0 * PI) / lambda).powf(junge - 2.0);
    0.434 * concentration * PI * size_term * k
}
