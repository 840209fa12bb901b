use std::sync::Arc;

use crate::ephemeris::{Body, LowPrecisionEphemeris, Observer};

use super::config::{Config, ConfigError};

/// Everything a request needs, resolved once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ephemeris: Arc<LowPrecisionEphemeris>,
    pub bodies: Arc<Vec<Body>>,
    pub observer: Observer,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let observer = config.observer()?;
        let catalog = config.star_catalog()?;
        let bodies = config.load_bodies(&catalog)?;
        let ephemeris = config.ephemeris();

        log::info!(
            "Observing {} bodies from {} ({:.4}, {:.4})",
            bodies.len(),
            config.observer.name.as_deref().unwrap_or("unnamed site"),
            observer.latitude_deg,
            observer.longitude_deg
        );

        Ok(Self {
            config: Arc::new(config),
            ephemeris: Arc::new(ephemeris),
            bodies: Arc::new(bodies),
            observer,
        })
    }
}
