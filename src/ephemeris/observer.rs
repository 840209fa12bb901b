use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::EphemerisError;
use super::math::{cos_deg, sin_deg};

// WGS-84 polar/equatorial axis ratio
const AXIS_RATIO: f64 = 0.996_647_19;
const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_140.0;

/// A place on the ground the sky is seen from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub elevation_m: f64,
}

impl Observer {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Result<Self, EphemerisError> {
        let observer = Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        };
        observer.validate()?;
        Ok(observer)
    }

    /// Parse `"lat, lon"` in degrees.
    pub fn from_coordinates(
        coordinates: &str,
        elevation_m: Option<f64>,
    ) -> Result<Self, EphemerisError> {
        let invalid = || EphemerisError::InvalidCoordinates(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat = parts[0].parse().map_err(|_| invalid())?;
        let lon = parts[1].parse().map_err(|_| invalid())?;
        Self::new(lat, lon, elevation_m.unwrap_or(0.0))
    }

    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(EphemerisError::InvalidLatitude(self.latitude_deg));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(EphemerisError::InvalidLongitude(self.longitude_deg));
        }
        Ok(())
    }

    /// `(ρ sin φ', ρ cos φ')` in Earth equatorial radii.
    pub fn geocentric_terms(&self) -> (f64, f64) {
        let u = (AXIS_RATIO * self.latitude_deg.to_radians().tan()).atan();
        let h = self.elevation_m / EARTH_EQUATORIAL_RADIUS_M;
        (
            AXIS_RATIO * u.sin() + h * sin_deg(self.latitude_deg),
            u.cos() + h * cos_deg(self.latitude_deg),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_string() {
        let paris = Observer::from_coordinates("48.8566, 2.3522", Some(35.0)).unwrap();
        assert_eq!(paris.latitude_deg, 48.8566);
        assert_eq!(paris.longitude_deg, 2.3522);
        assert_eq!(paris.elevation_m, 35.0);
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["48.8566", "north, east", "1, 2, 3", ""] {
            assert!(matches!(
                Observer::from_coordinates(bad, None),
                Err(EphemerisError::InvalidCoordinates(_))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert_eq!(
            Observer::new(91.0, 0.0, 0.0),
            Err(EphemerisError::InvalidLatitude(91.0))
        );
        assert_eq!(
            Observer::new(0.0, -181.0, 0.0),
            Err(EphemerisError::InvalidLongitude(-181.0))
        );
        assert!(Observer::new(f64::NAN, 0.0, 0.0).is_err());
    }

    #[test]
    fn geocentric_terms_reference_example() {
        // Palomar: φ = 33°21'22", H = 1706 m
        let palomar = Observer::new(33.356111, -116.8625, 1706.0).unwrap();
        let (rho_sin, rho_cos) = palomar.geocentric_terms();
        assert!((rho_sin - 0.546861).abs() < 1e-5);
        assert!((rho_cos - 0.836339).abs() < 1e-5);
    }
}
