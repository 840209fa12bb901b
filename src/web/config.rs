use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::{CatalogError, StarCatalog};
use crate::ephemeris::{Body, EphemerisError, LowPrecisionEphemeris, Observer, Refraction};
use crate::sampler::DEFAULT_SAMPLE_COUNT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid observer: {0}")]
    Observer(#[from] EphemerisError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub observer: ObserverConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Bodies to observe: `sun`, `moon`, a star name or `HIP <n>`
    #[serde(default = "default_bodies")]
    pub bodies: Vec<String>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ephemeris: EphemerisConfig,
    #[serde(default)]
    pub web: WebConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            observer: ObserverConfig::default(),
            sweep: SweepConfig::default(),
            bodies: default_bodies(),
            catalog: CatalogConfig::default(),
            ephemeris: EphemerisConfig::default(),
            web: WebConfig::default(),
        }
    }
}

fn default_bodies() -> Vec<String> {
    vec!["moon".into(), "sun".into(), "sirius".into()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObserverConfig {
    pub name: Option<String>,
    /// `"lat, lon"` in degrees
    #[serde(default = "default_coordinates")]
    pub coordinates: String,
    #[serde(default)]
    pub elevation_m: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: None,
            coordinates: default_coordinates(),
            elevation_m: 0.0,
        }
    }
}

fn default_coordinates() -> String {
    "48.8566, 2.3522".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
        }
    }
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Extra YAML star lists loaded on top of the built-in stars
    pub folder: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EphemerisConfig {
    /// Fixed TT - UT in seconds for the Sun instead of the built-in estimate
    pub delta_t_seconds: Option<f64>,
    /// Apply atmospheric refraction to altitudes when present
    pub refraction: Option<Refraction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep.sample_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "sweep.sample_count must be at least 2, got {}",
                self.sweep.sample_count
            )));
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::Invalid("no bodies configured".into()));
        }
        self.observer()?;
        if let Some(refraction) = &self.ephemeris.refraction {
            refraction
                .to_correction()
                .map_err(|e| ConfigError::Invalid(format!("ephemeris.refraction: {}", e)))?;
        }
        Ok(())
    }

    pub fn observer(&self) -> Result<Observer, ConfigError> {
        Ok(Observer::from_coordinates(
            &self.observer.coordinates,
            Some(self.observer.elevation_m),
        )?)
    }

    /// Built-in stars plus whatever the catalog folder holds.
    pub fn star_catalog(&self) -> Result<StarCatalog, ConfigError> {
        let mut catalog = StarCatalog::builtin();
        if let Some(folder) = &self.catalog.folder {
            let loaded = catalog.load_dir(folder)?;
            log::info!("Loaded {} stars from {}", loaded, folder.display());
        }
        Ok(catalog)
    }

    pub fn load_bodies(&self, catalog: &StarCatalog) -> Result<Vec<Body>, ConfigError> {
        self.bodies
            .iter()
            .map(|name| catalog.resolve_body(name).map_err(ConfigError::from))
            .collect()
    }

    pub fn ephemeris(&self) -> LowPrecisionEphemeris {
        LowPrecisionEphemeris::new(self.ephemeris.delta_t_seconds, self.ephemeris.refraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.sweep.sample_count, 100);
        assert_eq!(config.bodies, ["moon", "sun", "sirius"]);
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert!(config.catalog.folder.is_none());
        assert!(config.ephemeris.refraction.is_none());

        let observer = config.observer().unwrap();
        assert_eq!(observer.latitude_deg, 48.8566);
        assert_eq!(observer.longitude_deg, 2.3522);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
observer:
  name: Mauna Kea
  coordinates: "19.8207, -155.4681"
  elevation_m: 4205
sweep:
  sample_count: 289
bodies: [sun, Vega, HIP 32349]
ephemeris:
  delta_t_seconds: 69.2
  refraction:
    temperature_c: -2
web:
  bind: 127.0.0.1:9000
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.observer.name.as_deref(), Some("Mauna Kea"));
        assert_eq!(config.observer().unwrap().elevation_m, 4205.0);
        assert_eq!(config.sweep.sample_count, 289);

        let refraction = config.ephemeris.refraction.unwrap();
        assert_eq!(refraction.temperature_c, -2.0);
        assert_eq!(refraction.pressure_mbar, 1010.0);

        let bodies = config.load_bodies(&StarCatalog::builtin()).unwrap();
        let names: Vec<_> = bodies.iter().map(Body::name).collect();
        assert_eq!(names, ["Sun", "Vega", "Sirius"]);

        let ephemeris = config.ephemeris();
        assert_eq!(ephemeris.delta_t, Some(69.2));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_yaml("sweep: {sample_count: 1}"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("bodies: []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("observer: {coordinates: \"91, 0\"}"),
            Err(ConfigError::Observer(EphemerisError::InvalidLatitude(_)))
        ));
        assert!(matches!(
            Config::from_yaml("ephemeris: {refraction: {pressure_mbar: -5}}"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("sweep: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_body_fails_to_load() {
        let config = Config::from_yaml("bodies: [sun, Nibiru]").unwrap();
        assert!(matches!(
            config.load_bodies(&StarCatalog::builtin()),
            Err(ConfigError::Catalog(CatalogError::UnknownBody(_)))
        ));
    }
}
