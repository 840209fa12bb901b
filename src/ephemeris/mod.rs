mod body;
mod error;
mod horizon;
mod math;
mod moon;
mod observe;
mod observer;
mod star;
mod sun;

pub use body::{Body, BodyKind};
pub use error::EphemerisError;
pub use horizon::{Horizontal, Refraction};
pub use observe::{Ephemeris, LowPrecisionEphemeris};
pub use observer::Observer;
pub use star::CatalogStar;
