use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Failure surfaced unmodified from the external orbital propagator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("propagation error: {0}")]
pub struct PropagationError(pub String);

/// Black-box source of geodetic positions at a given instant.
///
/// Orbital element handling and propagation accuracy live outside this
/// crate; callers hand in whatever implementation they have, including a
/// plain closure.
pub trait Propagator: Send + Sync {
    fn position_at(&self, at: DateTime<Utc>) -> Result<GeoPoint, PropagationError>;
}

impl<F> Propagator for F
where
    F: Fn(DateTime<Utc>) -> Result<GeoPoint, PropagationError> + Send + Sync,
{
    fn position_at(&self, at: DateTime<Utc>) -> Result<GeoPoint, PropagationError> {
        self(at)
    }
}
