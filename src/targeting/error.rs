use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetingError {
    #[error("empty target set")]
    EmptyTargetSet,
}
