use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::fmt::Display;

use super::error::{BoxError, SamplerError};
use super::types::{BodySeries, DaySweep, TimeSample};

pub const DEFAULT_SAMPLE_COUNT: usize = 100;
const HOURS_PER_DAY: f64 = 24.0;

/// Evenly spaced hour offsets covering [0, 24], both ends included.
pub fn generate_hour_offsets(count: usize) -> Result<Vec<f64>, SamplerError> {
    if count < 2 {
        return Err(SamplerError::InvalidArgument(format!(
            "sample count must be at least 2, got {}",
            count
        )));
    }

    let last = (count - 1) as f64;
    Ok((0..count)
        .map(|i| HOURS_PER_DAY * i as f64 / last)
        .collect())
}

/// UTC moment for an hour offset into `date`, snapped down to the whole minute.
///
/// An offset of 24 lands on midnight of the following day.
pub fn moment_at(date: NaiveDate, hour_offset: f64) -> Result<DateTime<Utc>, SamplerError> {
    if !hour_offset.is_finite() || !(0.0..=HOURS_PER_DAY).contains(&hour_offset) {
        return Err(SamplerError::InvalidArgument(format!(
            "hour offset {} outside [0, 24]",
            hour_offset
        )));
    }

    let hours = hour_offset.trunc() as i64;
    let minutes = (hour_offset.fract() * 60.0).trunc() as i64;
    let midnight = date.and_time(NaiveTime::MIN).and_utc();

    Ok(midnight + Duration::hours(hours) + Duration::minutes(minutes))
}

/// Evaluate one body's altitude at every hour offset of `date`.
///
/// The first evaluator error aborts the pass; nothing is returned for the
/// samples evaluated before it.
pub fn sample_body<E, F>(
    hour_offsets: &[f64],
    date: NaiveDate,
    mut evaluator: F,
) -> Result<Vec<TimeSample>, SamplerError>
where
    F: FnMut(DateTime<Utc>) -> Result<f64, E>,
    E: Into<BoxError>,
{
    let moments = hour_offsets
        .iter()
        .map(|&h| moment_at(date, h).map(|m| (h, m)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut samples = Vec::with_capacity(moments.len());
    for (hour, moment) in moments {
        let altitude_deg = evaluator(moment).map_err(|e| SamplerError::EvaluatorFailure {
            moment,
            source: e.into(),
        })?;
        samples.push(TimeSample { hour, altitude_deg });
    }

    Ok(samples)
}

/// Index of the offset closest to `target`. Ties go to the lowest index.
///
/// Targets outside [0, 24] are not rejected; they resolve to the nearest end.
pub fn nearest_index(hour_offsets: &[f64], target: f64) -> Result<usize, SamplerError> {
    if target.is_nan() {
        return Err(SamplerError::InvalidArgument("target hour is NaN".into()));
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &h) in hour_offsets.iter().enumerate() {
        let distance = (h - target).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
        .ok_or_else(|| SamplerError::InvalidArgument("no hour offsets to search".into()))
}

/// Sample every body over the same offsets and locate the sample shared by all
/// of them that sits closest to `target`.
pub fn sweep_day<B, E, F>(
    hour_offsets: &[f64],
    date: NaiveDate,
    target: f64,
    bodies: &[B],
    mut evaluate: F,
) -> Result<DaySweep, SamplerError>
where
    B: Display,
    F: FnMut(&B, DateTime<Utc>) -> Result<f64, E>,
    E: Into<BoxError>,
{
    let nearest = nearest_index(hour_offsets, target)?;

    let mut series = Vec::with_capacity(bodies.len());
    for body in bodies {
        let samples = sample_body(hour_offsets, date, |moment| evaluate(body, moment))?;
        log::debug!("sampled {} altitudes for {} on {}", samples.len(), body, date);
        series.push(BodySeries {
            body: body.to_string(),
            samples,
        });
    }

    Ok(DaySweep {
        date,
        selected_hour: target,
        nearest_index: nearest,
        series,
    })
}
