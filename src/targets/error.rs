use thiserror::Error;

use crate::propagator::PropagationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("sampling interval must be positive")]
    NonPositiveInterval,
    #[error("shift probability must be within [0, 1]")]
    InvalidShiftProbability,
    #[error("maximum shift must be non-negative")]
    InvalidShiftMagnitude,
    #[error(transparent)]
    Propagation(#[from] PropagationError),
}
