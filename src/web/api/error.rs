use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::EphemerisError;
use crate::sampler::SamplerError;
use crate::sky::SkyError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Evaluation(String),
}

impl From<SkyError> for ApiError {
    fn from(e: SkyError) -> Self {
        let bad_request = match &e {
            SkyError::NoBodies => true,
            SkyError::Ephemeris(cause) => is_bad_argument(cause),
            SkyError::Sampler(SamplerError::InvalidArgument(_)) => true,
            // same ephemeris error, same status, whichever phase hit it
            SkyError::Sampler(SamplerError::EvaluatorFailure { source, .. }) => source
                .downcast_ref::<EphemerisError>()
                .is_some_and(is_bad_argument),
        };
        if bad_request {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Evaluation(e.to_string())
        }
    }
}

impl From<EphemerisError> for ApiError {
    fn from(e: EphemerisError) -> Self {
        if is_bad_argument(&e) {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Evaluation(e.to_string())
        }
    }
}

/// Errors the caller fixes by changing the query. Everything else is a
/// position that cannot be computed.
fn is_bad_argument(e: &EphemerisError) -> bool {
    matches!(
        e,
        EphemerisError::InvalidLatitude(_)
            | EphemerisError::InvalidLongitude(_)
            | EphemerisError::InvalidCoordinates(_)
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::Evaluation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message("evaluation_failed", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Debug, thiserror::Error)]
    #[error("no data")]
    struct NoData;

    #[test]
    fn evaluator_failures_are_unprocessable() {
        let e = SkyError::Sampler(SamplerError::EvaluatorFailure {
            moment: Utc.with_ymd_and_hms(2024, 6, 21, 3, 0, 0).unwrap(),
            source: Box::new(NoData),
        });
        let response = ApiError::from(e).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unsupported_date_is_unprocessable_in_either_phase() {
        let moment = Utc.with_ymd_and_hms(2201, 1, 1, 0, 0, 0).unwrap();
        let at_selected_minute = SkyError::Ephemeris(EphemerisError::UnsupportedDate(moment));
        let during_sweep = SkyError::Sampler(SamplerError::EvaluatorFailure {
            moment,
            source: Box::new(EphemerisError::UnsupportedDate(moment)),
        });

        for e in [at_selected_minute, during_sweep] {
            let response = ApiError::from(e).into_response();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn bad_coordinates_during_the_sweep_are_bad_requests() {
        let e = SkyError::Sampler(SamplerError::EvaluatorFailure {
            moment: Utc.with_ymd_and_hms(2024, 6, 21, 3, 0, 0).unwrap(),
            source: Box::new(EphemerisError::InvalidLongitude(200.0)),
        });
        let response = ApiError::from(e).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_arguments_are_bad_requests() {
        for e in [
            SkyError::NoBodies,
            SkyError::Ephemeris(EphemerisError::InvalidLatitude(95.0)),
            SkyError::Sampler(SamplerError::InvalidArgument("count".into())),
        ] {
            let response = ApiError::from(e).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
