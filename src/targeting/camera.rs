use serde::Serialize;

use crate::geo::{great_circle_distance_km, initial_bearing_deg, slant_distance_km, GeoPoint};

/// Virtual-camera pose looking from the satellite toward a ground target.
///
/// Heading is degrees clockwise from true north in [0, 360); tilt runs from
/// 0 (straight down) to 90 (horizon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraView {
    pub heading_deg: f64,
    pub tilt_deg: f64,
    pub range_m: f64,
    pub look_at: GeoPoint,
}

/// Derive the camera pose for a satellite looking at a ground target.
///
/// With a coincident ground projection the satellite sits directly overhead:
/// heading 0, tilt 0, range equal to the altitude (minus the offset, floored
/// at one meter).
pub fn compute_camera_view(satellite: GeoPoint, target: GeoPoint, range_offset_m: f64) -> CameraView {
    let dist_km = great_circle_distance_km(satellite, target);
    let heading_deg = initial_bearing_deg(satellite, target);

    // Elevation of the satellite as seen from the target.
    let elevation_deg = if dist_km > 0.0 {
        satellite.altitude_km.atan2(dist_km).to_degrees()
    } else {
        90.0
    };
    let tilt_deg = (90.0 - elevation_deg).clamp(0.0, 90.0);

    // The one-meter floor keeps the range positive when the offset exceeds
    // the true slant distance.
    let range_m = (slant_distance_km(satellite, target) * 1000.0 - range_offset_m).max(1.0);

    CameraView {
        heading_deg,
        tilt_deg,
        range_m,
        look_at: target,
    }
}
