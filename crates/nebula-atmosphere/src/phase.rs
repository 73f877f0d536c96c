//! Phase functions: angular distribution of singly scattered light.

use std::f32::consts::PI;

/// Mie and Rayleigh phase evaluators used by the sky composer.
///
/// `cos_theta` is the cosine between the view direction and the direction
/// toward the sun.
pub trait PhaseFunctions {
    /// Aerosol phase for asymmetry `g`.
    fn mie(&self, cos_theta: f32, g: f32) -> f32;
    /// Molecular phase.
    fn rayleigh(&self, cos_theta: f32) -> f32;
}

/// Henyey-Greenstein Mie (cosine saturated to `[0, 1]`) with the
/// `3/(16π)·(1 + cos²θ)` Rayleigh phase.
///
/// Saturating the cosine keeps the backward hemisphere at the 90° value,
/// matching the reference sky shading.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPhase;

impl PhaseFunctions for StandardPhase {
    #[inline]
    fn mie(&self, cos_theta: f32, g: f32) -> f32 {
        henyey_greenstein(cos_theta.clamp(0.0, 1.0), g)
    }

    #[inline]
    fn rayleigh(&self, cos_theta: f32) -> f32 {
        rayleigh_phase(cos_theta)
    }
}

/// Cornette-Shanks Mie with the standard Rayleigh phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornetteShanksPhase;

impl PhaseFunctions for CornetteShanksPhase {
    #[inline]
    fn mie(&self, cos_theta: f32, g: f32) -> f32 {
        cornette_shanks(cos_theta, g)
    }

    #[inline]
    fn rayleigh(&self, cos_theta: f32) -> f32 {
        rayleigh_phase(cos_theta)
    }
}

/// Rayleigh phase function, normalized over the sphere.
pub fn rayleigh_phase(cos_theta: f32) -> f32 {
    3.0 / (16.0 * PI) * (1.0 + cos_theta * cos_theta)
}

/// Henyey-Greenstein phase function, normalized over the sphere.
pub fn henyey_greenstein(cos_theta: f32, g: f32) -> f32 {
    let g2 = g * g;
    (1.0 - g2) / (4.0 * PI * (1.0 + g2 - 2.0 * g * cos_theta).powf(1.5))
}

/// Cornette-Shanks phase function, normalized over the sphere.
pub fn cornette_shanks(cos_theta: f32, g: f32) -> f32 {
    let g2 = g * g;
    let num = 3.0 * (1.0 - g2) * (1.0 + cos_theta * cos_theta);
    let denom = 8.0 * PI * (2.0 + g2) * (1.0 + g2 - 2.0 * g * cos_theta).powf(1.5);
    num / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integrate a phase function over the unit sphere (midpoint rule in cos θ).
    fn sphere_integral(f: impl Fn(f32) -> f32) -> f32 {
        let steps = 20_000;
        let d = 2.0 / steps as f32;
        (0..steps)
            .map(|i| {
                let mu = -1.0 + (i as f32 + 0.5) * d;
                f(mu) * d
            })
            .sum::<f32>()
            * 2.0
            * PI
    }

    #[test]
    fn test_rayleigh_normalized() {
        let total = sphere_integral(rayleigh_phase);
        assert!((total - 1.0).abs() < 2e-3, "total = {total}");
    }

    #[test]
    fn test_henyey_greenstein_normalized() {
        for g in [0.0_f32, 0.3, -0.4] {
            let total = sphere_integral(|mu| henyey_greenstein(mu, g));
            assert!((total - 1.0).abs() < 1e-2, "g {g}: total = {total}");
        }
    }

    #[test]
    fn test_cornette_shanks_normalized() {
        let total = sphere_integral(|mu| cornette_shanks(mu, 0.5));
        assert!((total - 1.0).abs() < 1e-2, "total = {total}");
    }

    #[test]
    fn test_isotropic_when_g_is_zero() {
        let iso = 1.0 / (4.0 * PI);
        assert!((henyey_greenstein(0.7, 0.0) - iso).abs() < 1e-7);
        assert!((henyey_greenstein(-0.7, 0.0) - iso).abs() < 1e-7);
    }

    #[test]
    fn test_mie_is_forward_peaked() {
        let g = 0.76;
        assert!(henyey_greenstein(1.0, g) > henyey_greenstein(0.0, g));
        assert!(cornette_shanks(1.0, g) > cornette_shanks(-1.0, g));
    }

    #[test]
    fn test_standard_phase_saturates_backward_hemisphere() {
        let phase = StandardPhase;
        let g = 0.76;
        assert_eq!(phase.mie(-0.8, g), phase.mie(0.0, g));
        assert_eq!(phase.mie(0.5, g), henyey_greenstein(0.5, g));
        assert_eq!(phase.rayleigh(-0.5), rayleigh_phase(-0.5));
    }
}
