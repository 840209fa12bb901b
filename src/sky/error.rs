use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::sampler::SamplerError;

#[derive(Debug, Error)]
pub enum SkyError {
    #[error("no bodies to observe")]
    NoBodies,
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("sampling error: {0}")]
    Sampler(#[from] SamplerError),
}
