use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-second angular rate between two consecutive camera poses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSample {
    pub timestamp: DateTime<Utc>,
    pub heading_rate_deg_s: f64,
    pub tilt_rate_deg_s: f64,
}
