use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solar_positioning::time::JulianDate;
use solar_positioning::RefractionCorrection;
use utoipa::ToSchema;

use super::error::EphemerisError;
use super::math::{cos_deg, normalize_degrees, signed_degrees, sin_deg, tan_deg};
use super::observer::Observer;

const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;
const J2000_JD: f64 = 2_451_545.0;
// geometric altitude of the Sun's centre at sunrise
const HORIZON_CUTOFF_DEG: f64 = -0.83337;

/// Geocentric right ascension and declination of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Geocentric distance; absent for stars
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Horizontal {
    pub altitude_deg: f64,
    /// Clockwise from north: 0 = N, 90 = E, 180 = S, 270 = W
    pub azimuth_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Atmospheric conditions for refraction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Refraction {
    #[serde(default = "default_temperature_c")]
    pub temperature_c: f64,
    #[serde(default = "default_pressure_mbar")]
    pub pressure_mbar: f64,
}

fn default_temperature_c() -> f64 {
    10.0
}

fn default_pressure_mbar() -> f64 {
    1010.0
}

impl Default for Refraction {
    fn default() -> Self {
        Self {
            temperature_c: default_temperature_c(),
            pressure_mbar: default_pressure_mbar(),
        }
    }
}

impl Refraction {
    /// Atmosphere handed to the solar position algorithm.
    pub fn to_correction(&self) -> Result<RefractionCorrection, EphemerisError> {
        Ok(RefractionCorrection::new(self.pressure_mbar, self.temperature_c)?)
    }

    /// Lift in degrees for a body at geometric altitude `altitude_deg`.
    ///
    /// Same formula and cut-off SPA applies to the Sun. Zero once the body is
    /// well below the horizon.
    pub fn correction(&self, altitude_deg: f64) -> f64 {
        if altitude_deg <= HORIZON_CUTOFF_DEG {
            return 0.0;
        }
        (self.pressure_mbar / 1010.0) * (283.0 / (273.0 + self.temperature_c)) * 1.02
            / (60.0 * tan_deg(altitude_deg + 10.3 / (altitude_deg + 5.11)))
    }

    /// Altitude at which a body with geometric altitude `altitude_deg` appears.
    pub fn apply(&self, altitude_deg: f64) -> f64 {
        altitude_deg + self.correction(altitude_deg)
    }
}

/// Greenwich mean sidereal time in degrees for a UT Julian date.
pub fn gmst(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / 36525.0;
    normalize_degrees(
        280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Local hour angle in (-180, 180] of a right ascension seen from `longitude_deg`.
pub fn hour_angle(
    moment: DateTime<Utc>,
    longitude_deg: f64,
    ra_deg: f64,
) -> Result<f64, EphemerisError> {
    let jd = JulianDate::from_datetime(&moment, 0.0)?;
    Ok(signed_degrees(gmst(jd.julian_date()) + longitude_deg - ra_deg))
}

/// Shift a geocentric position with a known distance to the observer's
/// point of view. Returns the topocentric position and hour angle.
pub fn topocentric(
    position: Equatorial,
    hour_angle_deg: f64,
    observer: &Observer,
) -> (Equatorial, f64) {
    let Some(distance_km) = position.distance_km else {
        return (position, hour_angle_deg);
    };

    let sin_parallax = EARTH_EQUATORIAL_RADIUS_KM / distance_km;
    let (rho_sin_phi, rho_cos_phi) = observer.geocentric_terms();
    let cos_dec = cos_deg(position.dec_deg);

    let denominator = cos_dec - rho_cos_phi * sin_parallax * cos_deg(hour_angle_deg);
    let delta_ra = (-rho_cos_phi * sin_parallax * sin_deg(hour_angle_deg))
        .atan2(denominator)
        .to_degrees();
    let dec = ((sin_deg(position.dec_deg) - rho_sin_phi * sin_parallax) * cos_deg(delta_ra))
        .atan2(denominator)
        .to_degrees();

    let rho_squared = rho_sin_phi * rho_sin_phi + rho_cos_phi * rho_cos_phi;
    let distance = distance_km
        * (1.0
            - 2.0
                * sin_parallax
                * (rho_cos_phi * cos_dec * cos_deg(hour_angle_deg)
                    + rho_sin_phi * sin_deg(position.dec_deg))
            + rho_squared * sin_parallax * sin_parallax)
            .max(0.0)
            .sqrt();

    (
        Equatorial {
            ra_deg: normalize_degrees(position.ra_deg + delta_ra),
            dec_deg: dec,
            distance_km: Some(distance),
        },
        hour_angle_deg - delta_ra,
    )
}

/// Altitude and azimuth (from north) for an hour angle and declination.
pub fn to_horizontal(hour_angle_deg: f64, dec_deg: f64, latitude_deg: f64) -> (f64, f64) {
    let sin_lat = sin_deg(latitude_deg);
    let cos_lat = cos_deg(latitude_deg);
    let sin_dec = sin_deg(dec_deg);
    let cos_dec = cos_deg(dec_deg);
    let cos_ha = cos_deg(hour_angle_deg);

    let altitude = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha)
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    let azimuth = (-cos_dec * sin_deg(hour_angle_deg))
        .atan2(sin_dec * cos_lat - cos_dec * cos_ha * sin_lat)
        .to_degrees();

    (altitude, normalize_degrees(azimuth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridian_transit_faces_south_from_the_north() {
        let (alt, az) = to_horizontal(0.0, 0.0, 45.0);
        assert!((alt - 45.0).abs() < 1e-9);
        assert!((az - 180.0).abs() < 1e-9);
    }

    #[test]
    fn rising_body_is_in_the_east() {
        // Six hours before transit on the equator, an equatorial body sits on
        // the eastern horizon.
        let (alt, az) = to_horizontal(-90.0, 0.0, 0.0);
        assert!(alt.abs() < 1e-9);
        assert!((az - 90.0).abs() < 1e-9);
    }

    #[test]
    fn celestial_pole_sits_at_latitude_altitude() {
        let (alt, az) = to_horizontal(37.0, 90.0, 48.8566);
        assert!((alt - 48.8566).abs() < 1e-9);
        assert!(az < 1e-6 || az > 360.0 - 1e-6);
    }

    #[test]
    fn refraction_lifts_the_horizon() {
        let refraction = Refraction::default();
        let lifted = refraction.apply(0.0);
        assert!(lifted > 0.45 && lifted < 0.65, "{}", lifted);
        assert!((refraction.apply(90.0) - 90.0).abs() < 1e-3);
        assert_eq!(refraction.correction(-5.0), 0.0);
    }

    #[test]
    fn cold_dense_air_refracts_more() {
        let cold = Refraction {
            temperature_c: -20.0,
            pressure_mbar: 1030.0,
        };
        assert!(cold.correction(2.0) > Refraction::default().correction(2.0));
    }

    #[test]
    fn atmosphere_is_checked_by_the_solar_algorithm() {
        assert!(Refraction::default().to_correction().is_ok());
        let vacuum = Refraction {
            temperature_c: 10.0,
            pressure_mbar: 0.0,
        };
        assert!(matches!(
            vacuum.to_correction(),
            Err(EphemerisError::Solar(_))
        ));
    }

    #[test]
    fn gmst_matches_reference_example() {
        // 1987 April 10, 19h21m UT: 128.7378734°
        let theta = gmst(2446896.30625);
        assert!((theta - 128.7378734).abs() < 1e-6, "{}", theta);
    }

    #[test]
    fn hour_angle_is_signed() {
        use chrono::TimeZone;
        let moment = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
        // local sidereal time in Paris is about 131.1°
        let west = hour_angle(moment, 2.3522, 200.0).unwrap();
        let east = hour_angle(moment, 2.3522, 60.0).unwrap();
        assert!((west - -68.91).abs() < 0.01, "{}", west);
        assert!((east - 71.09).abs() < 0.01, "{}", east);
    }

    #[test]
    fn parallax_lowers_the_moon() {
        let observer = Observer::new(0.0, 0.0, 0.0).unwrap();
        let geocentric = Equatorial {
            ra_deg: 0.0,
            dec_deg: 0.0,
            distance_km: Some(384_400.0),
        };
        // Moon on the western horizon: parallax is close to its maximum.
        let (topo, ha) = topocentric(geocentric, 80.0, &observer);
        let (geo_alt, _) = to_horizontal(80.0, 0.0, 0.0);
        let (topo_alt, _) = to_horizontal(ha, topo.dec_deg, 0.0);
        let drop = geo_alt - topo_alt;
        assert!(drop > 0.9 && drop < 1.0, "{}", drop);
        assert!(topo.distance_km.unwrap() < 384_400.0);
    }

    #[test]
    fn stars_are_not_shifted() {
        let observer = Observer::new(48.0, 2.0, 0.0).unwrap();
        let star = Equatorial {
            ra_deg: 101.0,
            dec_deg: -16.7,
            distance_km: None,
        };
        let (topo, ha) = topocentric(star, 12.5, &observer);
        assert_eq!(topo, star);
        assert_eq!(ha, 12.5);
    }
}
