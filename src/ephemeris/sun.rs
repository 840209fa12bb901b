//! The Sun, from NREL's Solar Position Algorithm.
//!
//! SPA already returns topocentric azimuth and elevation, so the Sun skips
//! the hour angle and parallax reduction the other bodies go through.

use chrono::{DateTime, Datelike, Timelike, Utc};
use practical_astronomy_rust::sun as pa_sun;
use solar_positioning::spa;
use solar_positioning::time::DeltaT;

use super::error::EphemerisError;
use super::horizon::{Horizontal, Refraction};
use super::observer::Observer;

pub fn observe(
    observer: &Observer,
    moment: DateTime<Utc>,
    delta_t: Option<f64>,
    refraction: Option<&Refraction>,
) -> Result<Horizontal, EphemerisError> {
    let delta_t = match delta_t {
        Some(seconds) => seconds,
        None => DeltaT::estimate_from_date_like(moment)?,
    };
    let correction = refraction.map(Refraction::to_correction).transpose()?;

    let position = spa::solar_position(
        moment,
        observer.latitude_deg,
        observer.longitude_deg,
        observer.elevation_m,
        delta_t,
        correction,
    )?;

    Ok(Horizontal {
        altitude_deg: position.elevation_angle(),
        azimuth_deg: position.azimuth(),
        distance_km: Some(distance_km(moment)),
    })
}

/// Geocentric Earth-Sun distance.
fn distance_km(moment: DateTime<Utc>) -> f64 {
    let seconds = f64::from(moment.second()) + f64::from(moment.nanosecond()) / 1e9;
    let (distance_km, _, _, _) = pa_sun::sun_distance_and_angular_size(
        f64::from(moment.hour()),
        f64::from(moment.minute()),
        seconds,
        f64::from(moment.day()),
        moment.month(),
        moment.year().unsigned_abs(),
        false,
        0,
    );
    distance_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const AU_KM: f64 = 149_597_870.7;

    fn greenwich() -> Observer {
        Observer::new(51.4769, 0.0, 0.0).unwrap()
    }

    #[test]
    fn distance_follows_the_orbit() {
        // perihelion early January, aphelion early July
        let january = distance_km(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()) / AU_KM;
        let july = distance_km(Utc.with_ymd_and_hms(2024, 7, 5, 0, 0, 0).unwrap()) / AU_KM;
        assert!((january - 0.9833).abs() < 1e-3, "{}", january);
        assert!((july - 1.0167).abs() < 1e-3, "{}", july);
    }

    #[test]
    fn fixed_delta_t_barely_moves_the_sun() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let estimated = observe(&greenwich(), moment, None, None).unwrap();
        let fixed = observe(&greenwich(), moment, Some(0.0), None).unwrap();

        // ΔT only moves the Sun along its orbit, about 1° a day
        let shift = (estimated.azimuth_deg - fixed.azimuth_deg).abs();
        assert!(shift > 0.0 && shift < 0.01, "{}", shift);
    }

    #[test]
    fn equinox_noon_altitude_is_the_colatitude() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 7, 0).unwrap();
        let sun = observe(&greenwich(), noon, None, None).unwrap();
        assert!((sun.altitude_deg - (90.0 - 51.4769)).abs() < 0.3, "{:?}", sun);
        assert!((sun.azimuth_deg - 180.0).abs() < 1.0, "{:?}", sun);
    }

    #[test]
    fn bad_atmosphere_is_reported() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let boiling = Refraction {
            temperature_c: 150.0,
            pressure_mbar: 1010.0,
        };
        assert!(matches!(
            observe(&greenwich(), moment, None, Some(&boiling)),
            Err(EphemerisError::Solar(_))
        ));
    }
}
