use thiserror::Error;

use crate::propagator::PropagationError;
use crate::rate::RateError;
use crate::targeting::TargetingError;
use crate::targets::GenerateError;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already running")]
    AlreadyRunning,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("target generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("targeting error: {0}")]
    Targeting(#[from] TargetingError),
    #[error("rate error: {0}")]
    Rate(#[from] RateError),
    #[error(transparent)]
    Propagation(#[from] PropagationError),
}
