//! Sky composition: segment selection, integration, and phase weighting.

use glam::{Vec3, Vec4};

use crate::aerial::{AerialPerspective, aerial_perspective};
use crate::intersect::{RaySphereHit, ray_sphere_intersection};
use crate::params::ScatteringParams;
use crate::phase::{PhaseFunctions, StandardPhase};

/// Scale applied to the red camera transmittance before it fades the night sky.
pub const EPSILON: f32 = 1e-5;

/// Integration result for one view ray that reached the atmosphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyboxChapman {
    /// Transmittance and in-scattering over the integrated segment.
    pub scattering: AerialPerspective,
    /// Ray distance where integration starts (never behind the eye).
    pub near: f32,
    /// Ray distance where integration ends: the atmosphere exit, or the ground hit.
    pub far: f32,
    /// `true` when the planet lies entirely behind the eye or is not hit at all.
    pub misses_planet: bool,
}

/// Sky radiance for one view ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyInscattering {
    /// In-scattered radiance, already scaled by the sun radiance.
    pub color: Vec3,
    /// Night-sky fade factor. Zero whenever the ray hits the planet.
    pub night: f32,
}

impl SkyInscattering {
    /// Pack as `(r, g, b, night)`.
    pub fn to_vec4(self) -> Vec4 {
        self.color.extend(self.night)
    }
}

impl From<SkyInscattering> for Vec4 {
    fn from(sky: SkyInscattering) -> Self {
        sky.to_vec4()
    }
}

/// Select the view segment inside the atmosphere and integrate along it.
///
/// Returns `None` when the ray never enters the atmosphere in front of the
/// eye; that pixel gets no sky contribution. A ray that hits the ground is cut
/// at the hit point and integrated with the truncated sign convention.
pub fn compute_skybox_chapman(
    params: &ScatteringParams,
    eye: Vec3,
    view_dir: Vec3,
    light_dir: Vec3,
) -> Option<SkyboxChapman> {
    let outer = ray_sphere_intersection(
        eye,
        view_dir,
        params.earth_center,
        params.earth_atm_top_radius,
    );
    let (outer_near, mut outer_far) = match outer {
        RaySphereHit::Hit { t_min, t_max } if t_max > 0.0 => (t_min, t_max),
        _ => {
            tracing::trace!(?eye, ?view_dir, "view ray never enters the atmosphere");
            return None;
        }
    };

    let inner = ray_sphere_intersection(eye, view_dir, params.earth_center, params.earth_radius);
    let mut infinite = true;
    if let RaySphereHit::Hit { t_min, .. } = inner
        && t_min > 0.0
    {
        outer_far = t_min;
        infinite = false;
    }

    let eye = eye - params.earth_center;
    let near = outer_near.max(0.0);
    let start = eye + view_dir * near;
    let end = eye + view_dir * outer_far;

    let scattering = aerial_perspective(params, start, end, view_dir, light_dir, infinite);

    Some(SkyboxChapman {
        scattering,
        near,
        far: outer_far,
        misses_planet: inner.is_behind(),
    })
}

/// Sky radiance along `view_dir` with the standard phase functions.
///
/// `light_dir` is the direction sunlight travels. Returns `None` for rays that
/// never reach the atmosphere.
pub fn compute_sky_inscattering(
    params: &ScatteringParams,
    eye: Vec3,
    view_dir: Vec3,
    light_dir: Vec3,
) -> Option<SkyInscattering> {
    compute_sky_inscattering_with(&StandardPhase, params, eye, view_dir, light_dir)
}

/// Sky radiance along `view_dir` with caller-supplied phase functions.
pub fn compute_sky_inscattering_with<P: PhaseFunctions + ?Sized>(
    phase: &P,
    params: &ScatteringParams,
    eye: Vec3,
    view_dir: Vec3,
    light_dir: Vec3,
) -> Option<SkyInscattering> {
    let skybox = compute_skybox_chapman(params, eye, view_dir, light_dir)?;
    let insctr_optical_length = skybox.scattering.transmittance;

    let phase_theta = view_dir.dot(-light_dir);
    let phase_mie = phase.mie(phase_theta, params.mie_g);
    let phase_rayleigh = phase.rayleigh(phase_theta);
    // Driven by the red camera transmittance alone.
    let phase_night = 1.0 - (insctr_optical_length.x * EPSILON).clamp(0.0, 1.0);

    let insctr_total_mie = skybox.scattering.insctr_mie * params.wave_lambda_mie * phase_mie;
    let insctr_total_rayleigh =
        skybox.scattering.insctr_rayleigh * params.wave_lambda_rayleigh * phase_rayleigh;

    let sky = insctr_total_mie + insctr_total_rayleigh;
    let night = if skybox.misses_planet { phase_night } else { 0.0 };

    Some(SkyInscattering {
        color: sky * params.sun_radiance,
        night,
    })
}
