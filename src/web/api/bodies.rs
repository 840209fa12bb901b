use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::{Body, BodyKind};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct BodyInfo {
    pub name: String,
    pub kind: BodyKind,
    /// Hipparcos number, stars only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip: Option<u32>,
}

impl From<&Body> for BodyInfo {
    fn from(body: &Body) -> Self {
        let hip = match body {
            Body::Star(star) => Some(star.hip),
            _ => None,
        };
        BodyInfo {
            name: body.name().to_string(),
            kind: body.kind(),
            hip,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/bodies",
    responses(
        (status = 200, description = "Bodies included in every sky report", body = Vec<BodyInfo>)
    ),
    tag = "sky"
)]
pub async fn list_bodies(State(state): State<AppState>) -> Json<Vec<BodyInfo>> {
    Json(state.bodies.iter().map(BodyInfo::from).collect())
}
