//! Catalog stars: proper motion from the catalog epoch, then precession
//! from J2000 to the mean equinox of date.

use chrono::{DateTime, Datelike, Timelike, Utc};
use practical_astronomy_rust::coordinates as pa_coordinates;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::horizon::Equatorial;
use super::math::{cos_deg, dms_to_degrees, hms_to_degrees, normalize_degrees};

const MAS_PER_DEGREE: f64 = 3_600_000.0;
const DAYS_PER_YEAR: f64 = 365.25;
// 2000-01-01T12:00:00Z
const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// A fixed star as listed in a catalog, coordinates referred to J2000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogStar {
    /// Hipparcos number
    pub hip: u32,
    pub name: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Proper motion in RA, including the cos(dec) factor
    #[serde(default)]
    pub pm_ra_mas_yr: f64,
    #[serde(default)]
    pub pm_dec_mas_yr: f64,
    /// Epoch of the catalog position, Julian year
    #[serde(default = "default_epoch")]
    pub epoch: f64,
}

fn default_epoch() -> f64 {
    2000.0
}

impl CatalogStar {
    /// Mean J2000 position carried to `year` by proper motion.
    fn position_in(&self, year: f64) -> (f64, f64) {
        let years = year - self.epoch;
        let cos_dec = cos_deg(self.dec_deg);
        let ra = if cos_dec.abs() > 1e-12 {
            self.ra_deg + self.pm_ra_mas_yr * years / MAS_PER_DEGREE / cos_dec
        } else {
            self.ra_deg
        };
        let dec = self.dec_deg + self.pm_dec_mas_yr * years / MAS_PER_DEGREE;
        (normalize_degrees(ra), dec.clamp(-90.0, 90.0))
    }
}

/// Mean place of date. Nutation and aberration stay below 40" and are left out.
pub fn apparent_position(star: &CatalogStar, moment: DateTime<Utc>) -> Equatorial {
    let (ra, dec) = star.position_in(julian_year(moment));
    let day = f64::from(moment.day())
        + (f64::from(moment.num_seconds_from_midnight()) / 86_400.0);

    let (ra_h, ra_m, ra_s, dec_d, dec_m, dec_s) = pa_coordinates::correct_for_precession(
        ra / 15.0,
        0.0,
        0.0,
        dec,
        0.0,
        0.0,
        1.5,
        1,
        2000,
        day,
        moment.month(),
        moment.year().unsigned_abs(),
    );

    Equatorial {
        ra_deg: normalize_degrees(hms_to_degrees(ra_h, ra_m, ra_s)),
        dec_deg: dms_to_degrees(dec_d, dec_m, dec_s),
        distance_km: None,
    }
}

fn julian_year(moment: DateTime<Utc>) -> f64 {
    let days = (moment.timestamp() - J2000_UNIX_SECONDS) as f64 / 86_400.0;
    2000.0 + days / DAYS_PER_YEAR
}
