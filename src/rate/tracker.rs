use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::targeting::CameraView;

use super::error::RateError;
use super::sample::RateSample;

/// How heading differences are measured across the 0°/360° seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingWrap {
    /// Plain absolute difference; a 359° → 1° step reads as 358° of travel.
    Naive,
    /// Shortest angular path across the seam.
    #[default]
    Shortest,
}

fn heading_delta_deg(prev: f64, curr: f64, wrap: HeadingWrap) -> f64 {
    let delta = (curr - prev).abs();
    match wrap {
        HeadingWrap::Naive => delta,
        HeadingWrap::Shortest => {
            if delta > 180.0 {
                360.0 - delta
            } else {
                delta
            }
        }
    }
}

/// Per-second rate of change between two time-stamped camera poses.
pub fn compute_rate(
    prev: &CameraView,
    prev_t: DateTime<Utc>,
    curr: &CameraView,
    curr_t: DateTime<Utc>,
    wrap: HeadingWrap,
) -> Result<RateSample, RateError> {
    if curr_t <= prev_t {
        return Err(RateError::InvalidInterval);
    }
    let dt_s = (curr_t - prev_t)
        .to_std()
        .map_err(|_| RateError::InvalidInterval)?
        .as_secs_f64();

    Ok(RateSample {
        timestamp: curr_t,
        heading_rate_deg_s: heading_delta_deg(prev.heading_deg, curr.heading_deg, wrap) / dt_s,
        tilt_rate_deg_s: (curr.tilt_deg - prev.tilt_deg).abs() / dt_s,
    })
}

/// Keeps the single most recent pose and derives a rate on each update.
#[derive(Debug)]
pub struct RateTracker {
    wrap: HeadingWrap,
    last: Option<(CameraView, DateTime<Utc>)>,
}

impl RateTracker {
    pub fn new(wrap: HeadingWrap) -> Self {
        Self { wrap, last: None }
    }

    /// Feed the next observation.
    ///
    /// The first observation after construction or `reset` yields `Ok(None)`
    /// (insufficient history). The stored pose is only overwritten after a
    /// successful computation.
    pub fn update(
        &mut self,
        view: CameraView,
        at: DateTime<Utc>,
    ) -> Result<Option<RateSample>, RateError> {
        let sample = match &self.last {
            Some((prev, prev_t)) => Some(compute_rate(prev, *prev_t, &view, at, self.wrap)?),
            None => None,
        };
        self.last = Some((view, at));
        Ok(sample)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    use crate::geo::GeoPoint;

    fn view(heading_deg: f64, tilt_deg: f64) -> CameraView {
        CameraView {
            heading_deg,
            tilt_deg,
            range_m: 500_000.0,
            look_at: GeoPoint::new(0.0, 0.0, 0.0),
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn plain_rates_over_five_seconds() {
        let sample = compute_rate(
            &view(10.0, 20.0),
            t0(),
            &view(20.0, 35.0),
            t0() + Duration::seconds(5),
            HeadingWrap::Shortest,
        )
        .unwrap();
        assert_relative_eq!(sample.heading_rate_deg_s, 2.0);
        assert_relative_eq!(sample.tilt_rate_deg_s, 3.0);
    }

    #[test]
    fn identical_timestamps_are_rejected() {
        let result = compute_rate(
            &view(10.0, 20.0),
            t0(),
            &view(20.0, 35.0),
            t0(),
            HeadingWrap::Shortest,
        );
        assert_eq!(result, Err(RateError::InvalidInterval));
    }

    #[test]
    fn backwards_timestamps_are_rejected() {
        let result = compute_rate(
            &view(10.0, 20.0),
            t0(),
            &view(20.0, 35.0),
            t0() - Duration::seconds(1),
            HeadingWrap::Shortest,
        );
        assert_eq!(result, Err(RateError::InvalidInterval));
    }

    #[test]
    fn seam_crossing_naive_vs_shortest() {
        let prev = view(359.0, 10.0);
        let curr = view(1.0, 10.0);
        let later = t0() + Duration::seconds(1);

        let naive = compute_rate(&prev, t0(), &curr, later, HeadingWrap::Naive).unwrap();
        assert_relative_eq!(naive.heading_rate_deg_s, 358.0);

        let shortest = compute_rate(&prev, t0(), &curr, later, HeadingWrap::Shortest).unwrap();
        assert_relative_eq!(shortest.heading_rate_deg_s, 2.0);
    }

    #[test]
    fn tracker_needs_two_observations() {
        let mut tracker = RateTracker::new(HeadingWrap::Shortest);
        assert_eq!(tracker.update(view(10.0, 20.0), t0()).unwrap(), None);

        let sample = tracker
            .update(view(15.0, 22.0), t0() + Duration::seconds(5))
            .unwrap()
            .unwrap();
        assert_relative_eq!(sample.heading_rate_deg_s, 1.0);
        assert_relative_eq!(sample.tilt_rate_deg_s, 0.4);
    }

    #[test]
    fn tracker_reset_clears_history() {
        let mut tracker = RateTracker::new(HeadingWrap::Shortest);
        tracker.update(view(10.0, 20.0), t0()).unwrap();
        tracker.reset();
        assert_eq!(
            tracker
                .update(view(15.0, 22.0), t0() + Duration::seconds(5))
                .unwrap(),
            None
        );
    }

    #[test]
    fn failed_update_keeps_the_stored_pose() {
        let mut tracker = RateTracker::new(HeadingWrap::Shortest);
        tracker.update(view(10.0, 20.0), t0()).unwrap();

        // Out-of-order observation is rejected and must not become the
        // reference pose.
        assert!(tracker
            .update(view(50.0, 20.0), t0() - Duration::seconds(1))
            .is_err());

        let sample = tracker
            .update(view(20.0, 20.0), t0() + Duration::seconds(10))
            .unwrap()
            .unwrap();
        assert_relative_eq!(sample.heading_rate_deg_s, 1.0);
    }
}
