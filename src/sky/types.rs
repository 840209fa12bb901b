use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::{BodyKind, EphemerisError, Observer};
use crate::sampler::DaySweep;

/// What the user picked: a UTC date, a time of day and a place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub observer: Observer,
}

impl SkyRequest {
    /// Fill whatever the caller left out from the configured site and `now`.
    /// The site elevation is kept when only the coordinates change.
    pub fn resolve(
        site: &Observer,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<Self, EphemerisError> {
        let observer = Observer::new(
            latitude.unwrap_or(site.latitude_deg),
            longitude.unwrap_or(site.longitude_deg),
            site.elevation_m,
        )?;

        Ok(Self {
            date: date.unwrap_or_else(|| now.date_naive()),
            time: time.unwrap_or_else(|| now.time()),
            observer,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BodyPosition {
    pub body: String,
    pub kind: BodyKind,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl BodyPosition {
    /// e.g. `Moon : altitude 12.34°, azimuth 250.10°`
    pub fn summary_line(&self) -> String {
        format!(
            "{} : altitude {:.2}°, azimuth {:.2}°",
            self.body, self.altitude_deg, self.azimuth_deg
        )
    }
}

/// Where every body stands at one minute.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkySnapshot {
    pub observer: Observer,
    pub moment: DateTime<Utc>,
    pub positions: Vec<BodyPosition>,
}

impl SkySnapshot {
    pub fn summary_lines(&self) -> Vec<String> {
        self.positions.iter().map(BodyPosition::summary_line).collect()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkyReport {
    pub observer: Observer,
    pub moment: DateTime<Utc>,
    pub positions: Vec<BodyPosition>,
    pub sweep: DaySweep,
}

impl SkyReport {
    /// One line per body.
    pub fn summary_lines(&self) -> Vec<String> {
        self.positions.iter().map(BodyPosition::summary_line).collect()
    }
}
