use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Deserialize;

use crate::geo::{destination_point, initial_bearing_deg, GeoPoint};
use crate::propagator::Propagator;

use super::error::GenerateError;

/// Lateral perturbation applied by [`generate_shifted_targets`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShiftConfig {
    pub max_shift_km: f64,
    pub shift_prob: f64,
}

/// Sample the propagated ground track at a fixed interval.
///
/// Produces `floor(window / interval)` points starting at `start`, each
/// projected to the ground.
pub fn generate_targets<P: Propagator + ?Sized>(
    propagator: &P,
    start: DateTime<Utc>,
    window: Duration,
    interval: Duration,
) -> Result<Vec<GeoPoint>, GenerateError> {
    if interval.num_milliseconds() <= 0 {
        return Err(GenerateError::NonPositiveInterval);
    }
    let count = (window.num_milliseconds() / interval.num_milliseconds()).max(0) as usize;

    let mut targets = Vec::with_capacity(count);
    let mut cursor = start;
    for _ in 0..count {
        let position = propagator.position_at(cursor)?;
        targets.push(position.ground());
        cursor += interval;
    }
    Ok(targets)
}

/// Sample the ground track, displacing points off-track at random.
///
/// Every point after the first is, with probability `shift.shift_prob`,
/// moved by a magnitude drawn uniformly from `[0, shift.max_shift_km]` at
/// ±90° (equal odds) off the bearing from the previous unshifted point to
/// the current one. The caller supplies the generator, so a seeded `StdRng`
/// reproduces the exact same set.
pub fn generate_shifted_targets<P: Propagator + ?Sized, R: Rng>(
    propagator: &P,
    start: DateTime<Utc>,
    window: Duration,
    interval: Duration,
    shift: ShiftConfig,
    rng: &mut R,
) -> Result<Vec<GeoPoint>, GenerateError> {
    if !(0.0..=1.0).contains(&shift.shift_prob) {
        return Err(GenerateError::InvalidShiftProbability);
    }
    if shift.max_shift_km < 0.0 {
        return Err(GenerateError::InvalidShiftMagnitude);
    }

    let track = generate_targets(propagator, start, window, interval)?;
    let mut targets = Vec::with_capacity(track.len());
    for (i, &point) in track.iter().enumerate() {
        if i == 0 || !rng.random_bool(shift.shift_prob) {
            targets.push(point);
            continue;
        }
        let along = initial_bearing_deg(track[i - 1], point);
        let side = if rng.random_bool(0.5) { 90.0 } else { -90.0 };
        let magnitude = rng.random_range(0.0..=shift.max_shift_km);
        targets.push(destination_point(point, (along + side).rem_euclid(360.0), magnitude));
    }
    Ok(targets)
}
