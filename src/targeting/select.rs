use crate::geo::{great_circle_distance_km, GeoPoint};

use super::error::TargetingError;

/// Pick the target closest to the satellite's ground track.
///
/// Ranking uses horizontal great-circle distance only; altitude plays no
/// part in the ordering. Ties keep the first occurrence in iteration order.
pub fn select_nearest_target(
    satellite: GeoPoint,
    targets: &[GeoPoint],
) -> Result<GeoPoint, TargetingError> {
    let mut best: Option<(f64, GeoPoint)> = None;
    for &target in targets {
        let dist = great_circle_distance_km(satellite, target);
        match best {
            Some((min, _)) if dist >= min => {}
            _ => best = Some((dist, target)),
        }
    }
    best.map(|(_, target)| target)
        .ok_or(TargetingError::EmptyTargetSet)
}
