use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use super::star::CatalogStar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BodyKind {
    Sun,
    Moon,
    Star,
}

/// Something in the sky that can be observed.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Sun,
    Moon,
    Star(CatalogStar),
}

impl Body {
    pub fn name(&self) -> &str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Star(star) => &star.name,
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Sun => BodyKind::Sun,
            Body::Moon => BodyKind::Moon,
            Body::Star(_) => BodyKind::Star,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
