mod error;
mod report;
mod types;

pub use error::SkyError;
pub use report::{compute_positions, compute_report};
pub use types::{BodyPosition, SkyReport, SkyRequest, SkySnapshot};
