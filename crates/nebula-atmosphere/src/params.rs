//! Physical description of a planet's atmosphere.

use glam::Vec3;

use crate::error::AtmosphereError;
use crate::wavelength;

/// Atmosphere parameter block consumed by every scattering function.
///
/// Lengths may be in any unit as long as radii, scale heights and the
/// reciprocal-length coefficients agree. [`ScatteringParams::earth`] uses
/// kilometres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatteringParams {
    /// Multiplier applied to the final sky color.
    pub sun_radiance: f32,
    /// Mie phase asymmetry (Henyey-Greenstein `g`), in `(-1, 1)`.
    pub mie_g: f32,
    /// Aerosol scale height.
    pub mie_height: f32,
    /// Molecular scale height. Also drives the Chapman optical depth.
    pub rayleigh_height: f32,
    /// Per-channel sampling wavelengths in nanometres (R, G, B).
    pub wave_lambda: Vec3,
    /// Per-channel Mie scattering coefficients.
    pub wave_lambda_mie: Vec3,
    /// Per-channel Rayleigh scattering coefficients.
    pub wave_lambda_rayleigh: Vec3,
    /// Planet surface radius.
    pub earth_radius: f32,
    /// Radius of the outer atmosphere boundary.
    pub earth_atm_top_radius: f32,
    /// World-space center shared by both spheres.
    pub earth_center: Vec3,
}

impl ScatteringParams {
    /// Earth-like atmosphere in kilometres, centered at the world origin.
    ///
    /// Coefficients are the usual sea-level measurements: Rayleigh
    /// `(5.802, 13.558, 33.1)e-3 /km` and a grey Mie term of `3.996e-3 /km`.
    pub fn earth() -> Self {
        Self {
            sun_radiance: 20.0,
            mie_g: 0.76,
            mie_height: 1.2,
            rayleigh_height: 8.0,
            wave_lambda: wavelength::DEFAULT_WAVELENGTHS_NM,
            wave_lambda_mie: Vec3::splat(3.996e-3),
            wave_lambda_rayleigh: Vec3::new(5.802e-3, 13.558e-3, 33.1e-3),
            earth_radius: 6360.0,
            earth_atm_top_radius: 6420.0,
            earth_center: Vec3::ZERO,
        }
    }

    /// Replace both coefficient vectors with values derived from
    /// [`wave_lambda`](Self::wave_lambda) and the given turbidity.
    ///
    /// `meters_per_unit` converts the per-metre physical coefficients into the
    /// length unit used by the radii (1000 for kilometres).
    pub fn with_derived_coefficients(mut self, turbidity: f32, meters_per_unit: f32) -> Self {
        let lambda_m = self.wave_lambda * 1e-9;
        self.wave_lambda_rayleigh = wavelength::rayleigh_coefficients(lambda_m) * meters_per_unit;
        self.wave_lambda_mie = wavelength::mie_coefficients(
            lambda_m,
            wavelength::MIE_K,
            turbidity,
            wavelength::JUNGE_EXPONENT,
        ) * meters_per_unit;
        self
    }

    /// Total per-channel extinction used by the integrator: `λ_mie + λ_rayleigh`.
    #[inline]
    pub fn extinction(&self) -> Vec3 {
        self.wave_lambda_mie + self.wave_lambda_rayleigh
    }

    /// Height of `point` above the planet surface.
    #[inline]
    pub fn altitude(&self, point: Vec3) -> f32 {
        (point - self.earth_center).length() - self.earth_radius
    }

    /// Atmosphere shell thickness.
    pub fn atmosphere_thickness(&self) -> f32 {
        self.earth_atm_top_radius - self.earth_radius
    }

    /// Check the invariants the scattering math relies on.
    ///
    /// The scattering functions never call this themselves; validate once when
    /// a parameter block is built or loaded.
    pub fn validate(&self) -> Result<(), AtmosphereError> {
        if !(self.earth_radius > 0.0 && self.earth_atm_top_radius > self.earth_radius) {
            return Err(AtmosphereError::InvalidRadii {
                planet: self.earth_radius,
                top: self.earth_atm_top_radius,
            });
        }
        for (layer, value) in [("rayleigh", self.rayleigh_height), ("mie", self.mie_height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(AtmosphereError::InvalidScaleHeight { layer, value });
            }
        }
        for (name, value) in [
            ("wave_lambda", self.wave_lambda),
            ("wave_lambda_mie", self.wave_lambda_mie),
            ("wave_lambda_rayleigh", self.wave_lambda_rayleigh),
        ] {
            if value.min_element() < 0.0 || value.is_nan() {
                return Err(AtmosphereError::NegativeCoefficient {
                    name,
                    value: value.to_array(),
                });
            }
        }
        if !(self.mie_g > -1.0 && self.mie_g < 1.0) {
            return Err(AtmosphereError::InvalidAsymmetry(self.mie_g));
        }
        Ok(())
    }
}

impl Default for ScatteringParams {
    fn default() -> Self {
        Self::earth()
    }
}
