use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("non-increasing sample timestamps")]
    InvalidInterval,
}
