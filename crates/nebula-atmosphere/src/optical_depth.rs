//! Closed-form optical depth of an exponential atmosphere.
//!
//! The optical depth from a point to the edge of the atmosphere is the
//! Chapman integral; [`chapman_approximation`] is Schueler's fit of it, which
//! [`optical_depth_schueler`] rescales to physical units.
//!
//! Nothing here is clamped. Rays grazing the horizon from high altitude ratios
//! overflow to `inf`, which downstream `exp(-x)` turns into zero transmittance.

use glam::Vec3;

use crate::params::ScatteringParams;

/// Optical depth at one sample point toward the sun and along the camera ray.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OpticalDepth {
    /// Depth from the sample point toward the sun.
    pub sun: f32,
    /// Depth from the sample point along the view ray, sign-adjusted for the
    /// integration direction.
    pub camera: f32,
}

/// Schueler's approximation of the Chapman function.
///
/// * `x` - planet radius in scale heights.
/// * `h` - altitude in scale heights.
/// * `cos_zenith` - cosine between the local up vector and the ray.
///
/// Returns the optical depth in scale heights. `cos_zenith == 0` takes the
/// upward branch.
pub fn chapman_approximation(x: f32, h: f32, cos_zenith: f32) -> f32 {
    let c = (x + h).sqrt();
    let c_exp_h = c * (-h).exp();

    if cos_zenith >= 0.0 {
        c_exp_h / (c * cos_zenith + 1.0)
    } else {
        let x0 = (1.0 - cos_zenith * cos_zenith).sqrt() * (x + h);
        // 2 * sqrt(x0) * exp(x - x0) as a single exponent: at x0 == 0 this is
        // exp(-inf) = 0 instead of 0 * inf.
        let grazing = 2.0 * ((x - x0) + 0.5 * x0.ln()).exp();
        grazing - c_exp_h / (1.0 - c * cos_zenith)
    }
}

/// Optical depth along a ray leaving altitude `h` at `cos_zenith`, for an
/// exponential layer of scale height `scale_height`.
#[inline]
pub fn optical_depth_schueler(h: f32, scale_height: f32, earth_radius: f32, cos_zenith: f32) -> f32 {
    scale_height * chapman_approximation(earth_radius / scale_height, h / scale_height, cos_zenith)
}

/// Analytic transmittance from `point` to the top of the atmosphere along `dir`.
///
/// A single Chapman evaluation, suited to attenuating direct sunlight at a
/// surface point. `point` is in world space.
pub fn transmittance(params: &ScatteringParams, point: Vec3, dir: Vec3) -> Vec3 {
    let local = point - params.earth_center;
    let radius = local.length();
    let cos_zenith = (local / radius).dot(dir);
    let depth = optical_depth_schueler(
        radius - params.earth_radius,
        params.rayleigh_height,
        params.earth_radius,
        cos_zenith,
    );
    (-params.extinction() * depth).exp()
}

/// Optical depth toward the sun and along the camera ray at `sample_point`.
///
/// `sample_point` is planet-centered. `light_dir` is the direction light
/// travels, so the sun lies along `-light_dir`. `neg` is `+1.0` when the view
/// segment runs out to the atmosphere top and `-1.0` when the ground cuts it
/// short; it flips the camera ray and the sign of its depth.
pub fn compute_optical_depth(
    params: &ScatteringParams,
    sample_point: Vec3,
    view_dir: Vec3,
    light_dir: Vec3,
    neg: f32,
) -> OpticalDepth {
    let radius = sample_point.length();
    let h = radius - params.earth_radius;
    let up = sample_point / radius;

    let cos_chi_sun = up.dot(-light_dir);
    let cos_chi_ray = up.dot(view_dir * neg);

    let sun = optical_depth_schueler(h, params.rayleigh_height, params.earth_radius, cos_chi_sun);
    let camera =
        optical_depth_schueler(h, params.rayleigh_height, params.earth_radius, cos_chi_ray) * neg;

    OpticalDepth { sun, camera }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: f32 = 6360.0 / 8.0;

    #[test]
    fn test_zenith_depth_is_close_to_one_scale_height() {
        // Straight up from the surface the exact integral is ~1 scale height.
        let depth = chapman_approximation(X, 0.0, 1.0);
        assert!((depth - 1.0).abs() < 0.05, "depth = {depth}");
    }

    #[test]
    fn test_depth_grows_toward_horizon() {
        let mut last = 0.0;
        for cos in [1.0_f32, 0.8, 0.5, 0.2, 0.0] {
            let depth = chapman_approximation(X, 0.5, cos);
            assert!(depth > last, "cos {cos}: {depth} <= {last}");
            last = depth;
        }
    }

    #[test]
    fn test_continuous_across_horizon() {
        for h in [0.0_f32, 0.5, 2.0, 7.5] {
            let at_zero = chapman_approximation(X, h, 0.0);
            let below = chapman_approximation(X, h, -1e-6);
            let above = chapman_approximation(X, h, 1e-6);
            let tol = 1e-3 * at_zero;
            assert!((below - at_zero).abs() <= tol, "h {h}: {below} vs {at_zero}");
            assert!((above - at_zero).abs() <= tol, "h {h}: {above} vs {at_zero}");
        }
    }

    #[test]
    fn test_zero_takes_upward_branch() {
        let h = 1.0;
        let c = (X + h).sqrt();
        let expected = c * (-h).exp();
        assert_eq!(chapman_approximation(X, h, 0.0), expected);
    }

    #[test]
    fn test_straight_down_is_finite() {
        let depth = chapman_approximation(X, 0.1, -1.0);
        assert!(depth.is_finite());
        assert!(depth < 0.0);
    }

    #[test]
    fn test_below_horizon_overflows_without_nan() {
        let depth = chapman_approximation(X, 0.0, -0.5);
        assert!(depth.is_infinite() && depth > 0.0);
    }

    #[test]
    fn test_schueler_rescales_by_scale_height() {
        let h = 2.0;
        let scale = 8.0;
        let direct = optical_depth_schueler(h, scale, 6360.0, 0.3);
        let dimensionless = chapman_approximation(6360.0 / scale, h / scale, 0.3);
        assert_eq!(direct, scale * dimensionless);
    }

    #[test]
    fn test_transmittance_is_bluer_at_zenith_than_at_horizon() {
        let params = ScatteringParams::earth();
        let ground = Vec3::new(0.0, params.earth_radius + 0.01, 0.0);
        let zenith = transmittance(&params, ground, Vec3::Y);
        let horizon = transmittance(&params, ground, Vec3::X);
        assert!(zenith.cmple(Vec3::ONE).all());
        assert!(horizon.cmplt(zenith).all());
        assert!(zenith.x > zenith.z, "red survives better than blue");
    }

    #[test]
    fn test_transmittance_respects_earth_center() {
        let params = ScatteringParams::earth();
        let shifted = ScatteringParams {
            earth_center: Vec3::new(100.0, -50.0, 25.0),
            ..params
        };
        let point = Vec3::new(0.0, params.earth_radius + 1.0, 0.0);
        let dir = Vec3::new(0.3, 0.9, 0.1).normalize();
        let a = transmittance(&params, point, dir);
        let b = transmittance(&shifted, point + shifted.earth_center, dir);
        assert!((a - b).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_negative_sign_flips_camera_depth() {
        let params = ScatteringParams::earth();
        let point = Vec3::new(0.0, params.earth_radius + 3.0, 0.0);
        let view = Vec3::new(1.0, -0.2, 0.0).normalize();
        let light = -Vec3::Y;

        let forward = compute_optical_depth(&params, point, view, light, 1.0);
        let reversed = compute_optical_depth(&params, point, view, light, -1.0);

        assert_eq!(forward.sun, reversed.sun);
        let up_depth = optical_depth_schueler(
            3.0,
            params.rayleigh_height,
            params.earth_radius,
            (point / point.length()).dot(-view),
        );
        assert_eq!(reversed.camera, -up_depth);
    }

    #[test]
    fn test_sun_overhead_uses_negated_light_direction() {
        let params = ScatteringParams::earth();
        let point = Vec3::new(0.0, params.earth_radius + 1.0, 0.0);
        let depth = compute_optical_depth(&params, point, Vec3::Y, -Vec3::Y, 1.0);
        let expected = optical_depth_schueler(1.0, 8.0, params.earth_radius, 1.0);
        assert_eq!(depth.sun, expected);
        assert_eq!(depth.camera, expected);
    }
}
