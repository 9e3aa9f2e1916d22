mod error;
mod generator;

pub use error::GenerateError;
pub use generator::{generate_shifted_targets, generate_targets, ShiftConfig};
