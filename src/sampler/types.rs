use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

/// One point of a day curve: hour offset into the date and the altitude there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TimeSample {
    pub hour: f64,
    pub altitude_deg: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BodySeries {
    pub body: String,
    pub samples: Vec<TimeSample>,
}

/// Altitude curves of several bodies sampled at the same hour offsets.
///
/// `nearest_index` points into every series of `series`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaySweep {
    pub date: NaiveDate,
    pub selected_hour: f64,
    pub nearest_index: usize,
    pub series: Vec<BodySeries>,
}

impl DaySweep {
    pub fn hours(&self) -> Vec<f64> {
        self.series
            .first()
            .map(|s| s.samples.iter().map(|p| p.hour).collect())
            .unwrap_or_default()
    }
}

/// Hour offset of a time of day at minute resolution (seconds are ignored).
pub fn selected_hour(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}
