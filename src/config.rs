//! Runtime configuration loaded from a JSON file
//!
//! ```json
//! {
//!   "width": 1280,
//!   "height": 720,
//!   "particles": 500,
//!   "max_force": 1.0,
//!   "resizable": true,
//!   "seed": 42
//! }
//! ```
//!
//! The Spanish keys used by older config files (`ancho`, `alto`, `particulas`,
//! `fuerza_max`, `redimensionable`, `semilla`) are accepted as aliases. Unknown
//! keys such as the old OpenGL version hints are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use particle_physics::Bounds;
use particle_simulation::SimulationParams;
use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file is not valid config JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A value is outside its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config {}: {}", path.display(), source)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SwarmConfig {
    /// Initial window width in pixels
    #[serde(alias = "ancho")]
    pub width: u32,
    /// Initial window height in pixels
    #[serde(alias = "alto")]
    pub height: u32,
    /// Total particle count, including the reference particle
    #[serde(alias = "particulas")]
    pub particles: usize,
    /// Upper bound on the magnitude of any pair coefficient
    #[serde(alias = "fuerza_max")]
    pub max_force: f64,
    #[serde(alias = "redimensionable")]
    pub resizable: bool,
    /// Fixed RNG seed; omitted for a different swarm every run
    #[serde(alias = "semilla")]
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            width: 1280,
            height: 720,
            particles: params.particle_count,
            max_force: params.max_force,
            resizable: true,
            seed: params.seed,
        }
    }
}

impl SwarmConfig {
    /// Load and validate the config at `path`. A missing file falls back to
    /// the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.max_force.is_finite() || self.max_force < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_force must be a finite value >= 0, got {}",
                self.max_force
            )));
        }
        if self.particles == 0 {
            log::warn!("particle count is 0, the swarm will be empty");
        }
        Ok(())
    }

    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            particle_count: self.particles,
            max_force: self.max_force,
            seed: self.seed,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_english_keys() {
        let file = write_config(
            r#"{"width": 800, "height": 600, "particles": 50, "max_force": 2.5, "resizable": false, "seed": 7}"#,
        );
        let config = SwarmConfig::load(file.path()).unwrap();

        assert_eq!(
            config,
            SwarmConfig {
                width: 800,
                height: 600,
                particles: 50,
                max_force: 2.5,
                resizable: false,
                seed: Some(7),
            }
        );
        assert_eq!(config.params().particle_count, 50);
        assert_eq!(config.bounds(), Bounds::new(800, 600));
    }

    #[test]
    fn test_legacy_keys_and_unknown_fields() {
        let file = write_config(
            r#"{
                "opengl_v_mayor": 4,
                "opengl_v_menor": 1,
                "redimensionable": true,
                "ancho": 1024,
                "alto": 768,
                "particulas": 300,
                "fuerza_max": 0.5
            }"#,
        );
        let config = SwarmConfig::load(file.path()).unwrap();

        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert_eq!(config.particles, 300);
        assert_eq!(config.max_force, 0.5);
        assert!(config.resizable);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = write_config(r#"{"particles": 10}"#);
        let config = SwarmConfig::load(file.path()).unwrap();
        assert_eq!(config.particles, 10);
        assert_eq!(config.width, SwarmConfig::default().width);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SwarmConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, SwarmConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let file = write_config(r#"{"max_force": -1.0}"#);
        assert!(matches!(
            SwarmConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));

        let file = write_config(r#"{"width": 0}"#);
        assert!(matches!(
            SwarmConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let file = write_config("{ not json");
        let err = SwarmConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
