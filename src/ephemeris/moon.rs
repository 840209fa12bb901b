//! The Moon's apparent geocentric place from Practical Astronomy's precise
//! lunar theory.

use chrono::{DateTime, Datelike, Timelike, Utc};
use practical_astronomy_rust::moon as pa_moon;

use super::horizon::Equatorial;
use super::math::{dms_to_degrees, hms_to_degrees};

pub fn apparent_position(moment: DateTime<Utc>) -> Equatorial {
    let seconds = f64::from(moment.second()) + f64::from(moment.nanosecond()) / 1e9;
    let (ra_h, ra_m, ra_s, dec_d, dec_m, dec_s, distance_km, _parallax) =
        pa_moon::precise_position_of_moon(
            f64::from(moment.hour()),
            f64::from(moment.minute()),
            seconds,
            false,
            0,
            f64::from(moment.day()),
            moment.month(),
            moment.year().unsigned_abs(),
        );

    Equatorial {
        ra_deg: hms_to_degrees(ra_h, ra_m, ra_s),
        dec_deg: dms_to_degrees(dec_d, dec_m, dec_s),
        distance_km: Some(distance_km),
    }
}
