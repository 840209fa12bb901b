use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::ephemeris::Observer;
use crate::sky::{compute_report, SkyReport, SkyRequest};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// One sample per minute of the day.
pub const MAX_SAMPLES: usize = 24 * 60 + 1;

#[derive(Debug, Default, Deserialize)]
pub struct SkyQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub samples: Option<usize>,
}

impl SkyQuery {
    pub fn to_request(&self, site: &Observer, now: DateTime<Utc>) -> ApiResult<SkyRequest> {
        Ok(SkyRequest::resolve(
            site,
            self.date,
            self.time,
            self.latitude,
            self.longitude,
            now,
        )?)
    }
}

#[utoipa::path(
    get,
    path = "/api/sky",
    tag = "sky",
    params(
        ("date" = Option<String>, Query, description = "UTC date (YYYY-MM-DD), today if omitted"),
        ("time" = Option<String>, Query, description = "UTC time of day (HH:MM), now if omitted"),
        ("latitude" = Option<f64>, Query, description = "Observer latitude in degrees"),
        ("longitude" = Option<f64>, Query, description = "Observer longitude in degrees"),
        ("samples" = Option<usize>, Query, description = "Number of samples over the day")
    ),
    responses(
        (status = 200, description = "Positions now and altitude over the day", body = SkyReport),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 422, description = "A position could not be computed", body = ErrorResponse)
    )
)]
pub async fn get_sky(
    State(state): State<AppState>,
    Query(query): Query<SkyQuery>,
) -> ApiResult<Json<SkyReport>> {
    let request = query.to_request(&state.observer, Utc::now())?;

    let sample_count = query.samples.unwrap_or(state.config.sweep.sample_count);
    if sample_count > MAX_SAMPLES {
        return Err(ApiError::Validation(format!(
            "samples must be at most {}, got {}",
            MAX_SAMPLES, sample_count
        )));
    }

    let report = compute_report(
        state.ephemeris.as_ref(),
        &state.bodies,
        &request,
        sample_count,
    )?;

    Ok(Json(report))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|s| {
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use chrono::TimeZone;

    use crate::web::config::Config;

    fn state() -> AppState {
        AppState::from_config(Config::default()).unwrap()
    }

    fn query(date: &str, time: &str) -> SkyQuery {
        SkyQuery {
            date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
            time: Some(NaiveTime::parse_from_str(time, "%H:%M").unwrap()),
            ..SkyQuery::default()
        }
    }

    #[test]
    fn time_accepts_minutes_and_seconds() {
        let q: SkyQuery = serde_json::from_str(r#"{"time": "07:45"}"#).unwrap();
        assert_eq!(q.time, NaiveTime::from_hms_opt(7, 45, 0));

        let q: SkyQuery = serde_json::from_str(r#"{"time": "07:45:30"}"#).unwrap();
        assert_eq!(q.time, NaiveTime::from_hms_opt(7, 45, 30));

        let q: SkyQuery = serde_json::from_str("{}").unwrap();
        assert!(q.time.is_none());

        assert!(serde_json::from_str::<SkyQuery>(r#"{"time": "noon"}"#).is_err());
    }

    #[test]
    fn query_overrides_the_site() {
        let site = Observer::new(10.0, 20.0, 300.0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 17, 42, 9).unwrap();
        let q = SkyQuery {
            longitude: Some(-70.0),
            ..query("2024-06-21", "05:00")
        };

        let request = q.to_request(&site, now).unwrap();
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        assert_eq!(request.time, NaiveTime::from_hms_opt(5, 0, 0).unwrap());
        assert_eq!(request.observer.latitude_deg, 10.0);
        assert_eq!(request.observer.longitude_deg, -70.0);
    }

    #[tokio::test]
    async fn returns_report_for_requested_moment() {
        let mut q = query("2024-06-21", "12:30");
        q.samples = Some(100);

        let Json(report) = get_sky(State(state()), Query(q)).await.unwrap();

        assert_eq!(report.positions.len(), 3);
        assert_eq!(report.moment, Utc.with_ymd_and_hms(2024, 6, 21, 12, 30, 0).unwrap());
        assert_eq!(report.sweep.nearest_index, 52);
        assert!(report.sweep.series.iter().all(|s| s.samples.len() == 100));

        let sun = &report.positions[1];
        assert_eq!(sun.body, "Sun");
        assert!(sun.altitude_deg > 60.0, "{}", sun.altitude_deg);
    }

    #[tokio::test]
    async fn invalid_latitude_is_a_bad_request() {
        let mut q = query("2024-06-21", "12:30");
        q.latitude = Some(123.0);

        let response = get_sky(State(state()), Query(q)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sample_count_is_bounded() {
        for samples in [1, MAX_SAMPLES + 1] {
            let mut q = query("2024-06-21", "12:30");
            q.samples = Some(samples);

            let response = get_sky(State(state()), Query(q)).await.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", samples);
        }
    }

    #[tokio::test]
    async fn unsupported_years_get_one_status_in_either_phase() {
        // 2200-12-31 fails on its 24:00 sample, 2201-01-01 on the selected minute
        for (date, time) in [("2200-12-31", "12:00"), ("2201-01-01", "00:00")] {
            let response = get_sky(State(state()), Query(query(date, time)))
                .await
                .into_response();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", date);
        }
    }
}
