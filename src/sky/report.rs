use chrono::{DateTime, Timelike, Utc};

use crate::ephemeris::{Body, Ephemeris};
use crate::sampler::{generate_hour_offsets, selected_hour, sweep_day, SamplerError};
use crate::sky::error::SkyError;
use crate::sky::types::{BodyPosition, SkyReport, SkyRequest, SkySnapshot};

/// Positions of `bodies` at the requested minute, seconds dropped. Nothing
/// is evaluated outside that minute.
pub fn compute_positions<E>(
    ephemeris: &E,
    bodies: &[Body],
    request: &SkyRequest,
) -> Result<SkySnapshot, SkyError>
where
    E: Ephemeris + ?Sized,
{
    if bodies.is_empty() {
        return Err(SkyError::NoBodies);
    }

    let observer = request.observer;
    let moment = selected_moment(request)?;

    let positions = bodies
        .iter()
        .map(|body| -> Result<BodyPosition, SkyError> {
            let seen = ephemeris.observe(&observer, body, moment)?;
            Ok(BodyPosition {
                body: body.name().to_string(),
                kind: body.kind(),
                altitude_deg: seen.altitude_deg,
                azimuth_deg: seen.azimuth_deg,
                distance_km: seen.distance_km,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SkySnapshot {
        observer,
        moment,
        positions,
    })
}

/// Positions of `bodies` at the requested minute plus their altitude over the
/// whole requested date. Fails as a whole if any single evaluation fails.
pub fn compute_report<E>(
    ephemeris: &E,
    bodies: &[Body],
    request: &SkyRequest,
    sample_count: usize,
) -> Result<SkyReport, SkyError>
where
    E: Ephemeris + ?Sized,
{
    let SkySnapshot {
        observer,
        moment,
        positions,
    } = compute_positions(ephemeris, bodies, request)?;

    let offsets = generate_hour_offsets(sample_count)?;
    let sweep = sweep_day(
        &offsets,
        request.date,
        selected_hour(request.time),
        bodies,
        |body, at| {
            ephemeris
                .observe(&observer, body, at)
                .map(|h| h.altitude_deg)
        },
    )?;

    log::info!(
        "Computed sky for {} bodies at {} from {:.4}, {:.4} ({} samples)",
        bodies.len(),
        moment,
        observer.latitude_deg,
        observer.longitude_deg,
        sample_count
    );

    Ok(SkyReport {
        observer,
        moment,
        positions,
        sweep,
    })
}

/// The requested date and time with seconds dropped.
fn selected_moment(request: &SkyRequest) -> Result<DateTime<Utc>, SamplerError> {
    let time = request
        .time
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| SamplerError::InvalidArgument(format!("invalid time {}", request.time)))?;
    Ok(request.date.and_time(time).and_utc())
}
