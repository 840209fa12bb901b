use chrono::{DateTime, Utc};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("evaluator failed at {moment}: {source}")]
    EvaluatorFailure {
        moment: DateTime<Utc>,
        #[source]
        source: BoxError,
    },
}
