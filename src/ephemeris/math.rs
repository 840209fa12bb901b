//! Degree-based trigonometry and sexagesimal helpers.

pub fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

pub fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

pub fn tan_deg(x: f64) -> f64 {
    x.to_radians().tan()
}

/// Map an angle to [0, 360).
pub fn normalize_degrees(x: f64) -> f64 {
    let a = x.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Map an angle to (-180, 180].
pub fn signed_degrees(x: f64) -> f64 {
    let a = normalize_degrees(x);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Right ascension given as hours, minutes and seconds.
pub fn hms_to_degrees(hours: f64, minutes: f64, seconds: f64) -> f64 {
    (hours + minutes / 60.0 + seconds / 3600.0) * 15.0
}

/// Declination given as degrees, minutes and seconds. The sign sits on the
/// degrees, which may be -0 just south of the equator.
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let magnitude = degrees.abs() + minutes.abs() / 60.0 + seconds.abs() / 3600.0;
    if degrees.is_sign_negative() || minutes < 0.0 || seconds < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
