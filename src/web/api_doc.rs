use utoipa::OpenApi;

use super::api::bodies::BodyInfo;
use super::api::error::ErrorResponse;
use super::api::health::HealthResponse;
use crate::ephemeris::{BodyKind, Observer};
use crate::sampler::{BodySeries, DaySweep, TimeSample};
use crate::sky::{BodyPosition, SkyReport};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::sky::get_sky,
        super::api::bodies::list_bodies,
        super::api::health::health,
    ),
    components(
        schemas(
            SkyReport,
            BodyPosition,
            DaySweep,
            BodySeries,
            TimeSample,
            Observer,
            BodyKind,
            BodyInfo,
            HealthResponse,
            ErrorResponse,
        )
    ),
    info(
        title = "Sky-O-Mat API",
        description = "Where the Sun, the Moon and bright stars stand in the sky, now and over a day",
        version = "0.1.0"
    ),
    tags(
        (name = "sky", description = "Positions and altitude curves"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/sky", "/api/bodies", "/api/health"] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }
}
