use chrono::{DateTime, Datelike, Utc};

use super::body::Body;
use super::error::EphemerisError;
use super::horizon::{self, Equatorial, Horizontal, Refraction};
use super::observer::Observer;
use super::{moon, star, sun};

const FIRST_YEAR: i32 = 1800;
const LAST_YEAR: i32 = 2200;

/// Where a body appears in the local sky at a given moment.
pub trait Ephemeris {
    fn observe(
        &self,
        observer: &Observer,
        body: &Body,
        moment: DateTime<Utc>,
    ) -> Result<Horizontal, EphemerisError>;
}

/// The Sun from SPA (`solar-positioning`), the Moon and star precession from
/// `practical-astronomy-rust`. Good to about an arcminute between 1800 and
/// 2200.
///
/// Without `refraction` altitudes are geometric (airless), which is what an
/// unrefracted alt/az reduction reports. `delta_t` only feeds SPA.
#[derive(Debug, Clone, Default)]
pub struct LowPrecisionEphemeris {
    pub delta_t: Option<f64>,
    pub refraction: Option<Refraction>,
}

impl LowPrecisionEphemeris {
    pub fn new(delta_t: Option<f64>, refraction: Option<Refraction>) -> Self {
        Self {
            delta_t,
            refraction,
        }
    }

    /// Hour angle, parallax, horizon frame and refraction for a geocentric place.
    fn reduce(
        &self,
        geocentric: Equatorial,
        observer: &Observer,
        moment: DateTime<Utc>,
    ) -> Result<Horizontal, EphemerisError> {
        let hour_angle = horizon::hour_angle(moment, observer.longitude_deg, geocentric.ra_deg)?;
        let (position, hour_angle) = horizon::topocentric(geocentric, hour_angle, observer);
        let (mut altitude, azimuth) =
            horizon::to_horizontal(hour_angle, position.dec_deg, observer.latitude_deg);

        if let Some(refraction) = &self.refraction {
            altitude = refraction.apply(altitude);
        }

        Ok(Horizontal {
            altitude_deg: altitude,
            azimuth_deg: azimuth,
            distance_km: position.distance_km,
        })
    }
}

impl Ephemeris for LowPrecisionEphemeris {
    fn observe(
        &self,
        observer: &Observer,
        body: &Body,
        moment: DateTime<Utc>,
    ) -> Result<Horizontal, EphemerisError> {
        observer.validate()?;
        if !(FIRST_YEAR..=LAST_YEAR).contains(&moment.year()) {
            return Err(EphemerisError::UnsupportedDate(moment));
        }

        let seen = match body {
            Body::Sun => sun::observe(observer, moment, self.delta_t, self.refraction.as_ref())?,
            Body::Moon => self.reduce(moon::apparent_position(moment), observer, moment)?,
            Body::Star(s) => self.reduce(star::apparent_position(s, moment), observer, moment)?,
        };

        if !seen.altitude_deg.is_finite() {
            return Err(EphemerisError::NonFinite("altitude"));
        }
        if !seen.azimuth_deg.is_finite() {
            return Err(EphemerisError::NonFinite("azimuth"));
        }
        Ok(seen)
    }
}
