mod error;
mod sweep;
mod types;

pub use error::SamplerError;
pub use sweep::{
    generate_hour_offsets, moment_at, nearest_index, sample_body, sweep_day, DEFAULT_SAMPLE_COUNT,
};
pub use types::{selected_hour, BodySeries, DaySweep, TimeSample};
