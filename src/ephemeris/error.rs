use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("invalid latitude {0}° (must be between -90° and +90°)")]
    InvalidLatitude(f64),
    #[error("invalid longitude {0}° (must be between -180° and +180°)")]
    InvalidLongitude(f64),
    #[error("invalid coordinates '{0}', expected \"lat, lon\"")]
    InvalidCoordinates(String),
    #[error("{0} is outside the supported years 1800 to 2200")]
    UnsupportedDate(DateTime<Utc>),
    #[error("solar position: {0}")]
    Solar(#[from] solar_positioning::Error),
    #[error("computed {0} is not finite")]
    NonFinite(&'static str),
}
