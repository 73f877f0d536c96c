//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use glam::Vec3;
use nebula_atmosphere::ScatteringParams;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "nebula-sky";

/// Top-level sky renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Atmosphere physical parameters.
    pub atmosphere: AtmosphereConfig,
    /// Observer placement.
    pub camera: CameraConfig,
    /// Sun position.
    pub sun: SunConfig,
    /// Panorama output settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Serializable mirror of [`ScatteringParams`].
///
/// Vectors are stored as `[r, g, b]` / `[x, y, z]` arrays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Multiplier applied to the final sky color.
    pub sun_radiance: f32,
    /// Mie phase asymmetry in `(-1, 1)`.
    pub mie_g: f32,
    /// Aerosol scale height.
    pub mie_height: f32,
    /// Molecular scale height.
    pub rayleigh_height: f32,
    /// Sampling wavelengths in nanometres.
    pub wave_lambda: [f32; 3],
    /// Mie scattering coefficients per length unit.
    pub wave_lambda_mie: [f32; 3],
    /// Rayleigh scattering coefficients per length unit.
    pub wave_lambda_rayleigh: [f32; 3],
    /// Planet surface radius.
    pub earth_radius: f32,
    /// Atmosphere top radius.
    pub earth_atm_top_radius: f32,
    /// Planet center in world space.
    pub earth_center: [f32; 3],
    /// When set, both coefficient vectors are derived from `wave_lambda` and
    /// this turbidity instead of being read from the fields above.
    pub turbidity: Option<f32>,
    /// Metres per length unit of the radii (1000 for kilometres).
    pub meters_per_unit: f32,
}

/// Observer placement relative to the planet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye altitude above the surface, in the atmosphere's length unit.
    pub altitude: f32,
}

/// Sun position, either from a time of day or from explicit angles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    /// Time of day normalized to `[0.0, 1.0)`. 0.0 = midnight, 0.5 = noon.
    pub time_of_day: f64,
    /// Explicit sun elevation in degrees. Overrides `time_of_day` when set.
    pub elevation_deg: Option<f32>,
    /// Sun azimuth in degrees, measured from +X toward +Z. Used with `elevation_deg`.
    pub azimuth_deg: f32,
}

/// Panorama output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Panorama width in pixels.
    pub width: u32,
    /// Panorama height in pixels.
    pub height: u32,
    /// Exposure applied before tonemapping.
    pub exposure: f32,
    /// Output PNG path.
    pub path: PathBuf,
    /// Worker threads (0 = one per CPU core).
    pub threads: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self::from(&ScatteringParams::earth())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { altitude: 0.5 }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            time_of_day: 0.35,
            elevation_deg: None,
            azimuth_deg: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            exposure: 4.0,
            path: PathBuf::from("sky.png"),
            threads: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Atmosphere conversion ---

impl From<&ScatteringParams> for AtmosphereConfig {
    fn from(params: &ScatteringParams) -> Self {
        Self {
            sun_radiance: params.sun_radiance,
            mie_g: params.mie_g,
            mie_height: params.mie_height,
            rayleigh_height: params.rayleigh_height,
            wave_lambda: params.wave_lambda.to_array(),
            wave_lambda_mie: params.wave_lambda_mie.to_array(),
            wave_lambda_rayleigh: params.wave_lambda_rayleigh.to_array(),
            earth_radius: params.earth_radius,
            earth_atm_top_radius: params.earth_atm_top_radius,
            earth_center: params.earth_center.to_array(),
            turbidity: None,
            meters_per_unit: 1000.0,
        }
    }
}

impl AtmosphereConfig {
    /// Build and validate the parameter block.
    pub fn to_params(&self) -> Result<ScatteringParams, ConfigError> {
        let mut params = ScatteringParams {
            sun_radiance: self.sun_radiance,
            mie_g: self.mie_g,
            mie_height: self.mie_height,
            rayleigh_height: self.rayleigh_height,
            wave_lambda: Vec3::from(self.wave_lambda),
            wave_lambda_mie: Vec3::from(self.wave_lambda_mie),
            wave_lambda_rayleigh: Vec3::from(self.wave_lambda_rayleigh),
            earth_radius: self.earth_radius,
            earth_atm_top_radius: self.earth_atm_top_radius,
            earth_center: Vec3::from(self.earth_center),
        };
        if let Some(turbidity) = self.turbidity {
            params = params.with_derived_coefficients(turbidity, self.meters_per_unit);
            log::debug!(
                "Derived coefficients for turbidity {turbidity}: mie {:?}, rayleigh {:?}",
                params.wave_lambda_mie,
                params.wave_lambda_rayleigh
            );
        }
        params.validate()?;
        Ok(params)
    }
}

/// Platform configuration directory for the sky renderer.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_NAME))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1024"));
        assert!(ron_str.contains("earth_radius: 6360.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.atmosphere.turbidity = Some(3.0);
        config.sun.elevation_deg = Some(12.5);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(camera: (altitude: 2.0), output: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.atmosphere, AtmosphereConfig::default());
        assert_eq!(config.camera.altitude, 2.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_atmosphere_matches_earth_preset() {
        let params = AtmosphereConfig::default().to_params().unwrap();
        assert_eq!(params, ScatteringParams::earth());
    }

    #[test]
    fn test_invalid_atmosphere_is_rejected() {
        let atmosphere = AtmosphereConfig {
            earth_atm_top_radius: 100.0,
            ..AtmosphereConfig::default()
        };
        let err = atmosphere.to_params().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAtmosphere(_)));
    }

    #[test]
    fn test_turbidity_derives_coefficients() {
        let atmosphere = AtmosphereConfig {
            turbidity: Some(2.0),
            ..AtmosphereConfig::default()
        };
        let params = atmosphere.to_params().unwrap();
        let measured = ScatteringParams::earth();
        assert_ne!(params.wave_lambda_mie, measured.wave_lambda_mie);
        let ratio = params.wave_lambda_rayleigh.z / measured.wave_lambda_rayleigh.z;
        assert!((ratio - 1.0).abs() < 0.02);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.width = 2048;
        config.output.path = PathBuf::from("out/dawn.png");
        config.sun.time_of_day = 0.27;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.atmosphere.mie_g = 0.8;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().atmosphere.mie_g, 0.8);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_ron_comments_preserved() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
