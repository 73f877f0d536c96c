//! Sun placement: from a normalized time of day or from explicit angles.
//!
//! Time of day is `[0.0, 1.0)` with 0.0 midnight, 0.25 dawn, 0.5 noon and
//! 0.75 dusk. Y is up. The scattering functions take the direction light
//! travels, which is the negated toward-sun vector ([`light_direction`]).

use glam::Vec3;
use nebula_config::SunConfig;

/// Direction toward the sun from the time of day.
///
/// The sun orbits in the XY plane: overhead (+Y) at noon, directly below (−Y)
/// at midnight, rising toward +X.
pub fn sun_direction_from_time(time_of_day: f64) -> Vec3 {
    let angle = (time_of_day as f32) * std::f32::consts::TAU;
    Vec3::new(angle.sin(), -angle.cos(), 0.0).normalize()
}

/// Direction toward the sun from elevation above the horizon and azimuth
/// measured from +X toward +Z, both in degrees.
pub fn sun_direction_from_angles(elevation_deg: f32, azimuth_deg: f32) -> Vec3 {
    let elevation = elevation_deg.to_radians();
    let azimuth = azimuth_deg.to_radians();
    Vec3::new(
        elevation.cos() * azimuth.cos(),
        elevation.sin(),
        elevation.cos() * azimuth.sin(),
    )
}

/// Toward-sun direction selected by the configuration.
pub fn sun_direction(config: &SunConfig) -> Vec3 {
    match config.elevation_deg {
        Some(elevation) => sun_direction_from_angles(elevation, config.azimuth_deg),
        None => sun_direction_from_time(config.time_of_day),
    }
}

/// Direction sunlight travels, as consumed by the scattering functions.
#[inline]
pub fn light_direction(toward_sun: Vec3) -> Vec3 {
    -toward_sun
}

/// Sun elevation above the horizon in degrees.
pub fn sun_elevation_deg(toward_sun: Vec3) -> f32 {
    toward_sun.y.clamp(-1.0, 1.0).asin().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noon_sun_overhead() {
        let dir = sun_direction_from_time(0.5);
        assert!((dir - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_midnight_sun_below() {
        let dir = sun_direction_from_time(0.0);
        assert!((dir + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_dawn_sun_on_horizon() {
        let dir = sun_direction_from_time(0.25);
        assert!(dir.y.abs() < 1e-5);
        assert!(dir.x > 0.99);
    }

    #[test]
    fn test_angles_roundtrip_elevation() {
        for elevation in [-10.0_f32, 0.0, 5.0, 45.0, 89.0] {
            let dir = sun_direction_from_angles(elevation, 30.0);
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!((sun_elevation_deg(dir) - elevation).abs() < 1e-3);
        }
    }

    #[test]
    fn test_explicit_elevation_overrides_time() {
        let config = SunConfig {
            time_of_day: 0.0,
            elevation_deg: Some(30.0),
            azimuth_deg: 90.0,
        };
        let dir = sun_direction(&config);
        assert!(dir.y > 0.49);
        assert!(dir.z > 0.86);
    }

    #[test]
    fn test_light_travels_away_from_sun() {
        let toward = sun_direction_from_angles(20.0, 0.0);
        assert_eq!(light_direction(toward), -toward);
        assert!(light_direction(toward).y < 0.0);
    }
}
