mod error;
mod sample;
mod tracker;

pub use error::RateError;
pub use sample::RateSample;
pub use tracker::{compute_rate, HeadingWrap, RateTracker};
