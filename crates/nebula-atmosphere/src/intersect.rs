//! Ray-sphere intersection used for the planet and atmosphere-top shells.

use glam::Vec3;

/// Outcome of intersecting a ray's supporting line with a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RaySphereHit {
    /// Both roots of the quadratic, `t_min <= t_max`. Either root may be
    /// negative, meaning that crossing lies behind the ray origin.
    Hit {
        /// Distance to the near crossing.
        t_min: f32,
        /// Distance to the far crossing.
        t_max: f32,
    },
    /// The discriminant is negative: the line never touches the sphere.
    Miss,
}

impl RaySphereHit {
    /// `(t_min, t_max)` on a hit, `None` on a miss.
    pub fn distances(self) -> Option<(f32, f32)> {
        match self {
            Self::Hit { t_min, t_max } => Some((t_min, t_max)),
            Self::Miss => None,
        }
    }

    /// Returns `true` if no part of the sphere lies in front of the ray origin.
    pub fn is_behind(self) -> bool {
        match self {
            Self::Hit { t_min, t_max } => t_min < 0.0 && t_max < 0.0,
            Self::Miss => true,
        }
    }
}

/// Intersect the ray `position + t * dir` with a sphere.
///
/// `dir` must be unit length; the quadratic is solved in its reduced form
/// (`a == 1`, half-`b`).
pub fn ray_sphere_intersection(position: Vec3, dir: Vec3, center: Vec3, radius: f32) -> RaySphereHit {
    let origin = position - center;
    let b = origin.dot(dir);
    let c = origin.dot(origin) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return RaySphereHit::Miss;
    }
    let root = discriminant.sqrt();
    RaySphereHit::Hit {
        t_min: -b - root,
        t_max: -b + root,
    }
}
