use super::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points over a spherical Earth,
/// ignoring altitude.
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dphi = (b.latitude_deg - a.latitude_deg).to_radians();
    let dlambda = (b.longitude_deg - a.longitude_deg).to_radians();
    let h = (dphi / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push h just outside [0, 1]; the sqrt would then NaN.
    let h = h.clamp(0.0, 1.0);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Forward azimuth from `a` to `b` in degrees, normalized to [0, 360).
///
/// The bearing is undefined for coincident points; 0.0 is returned by
/// convention.
pub fn initial_bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    if a.latitude_deg == b.latitude_deg && a.longitude_deg == b.longitude_deg {
        return 0.0;
    }
    let dlambda = (b.longitude_deg - a.longitude_deg).to_radians();
    let x = dlambda.sin() * b.lat_rad().cos();
    let y = a.lat_rad().cos() * b.lat_rad().sin()
        - a.lat_rad().sin() * b.lat_rad().cos() * dlambda.cos();
    let deg = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid of a tiny negative angle rounds up to exactly 360.0
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Earth-centered Cartesian coordinates in km, with the radial distance
/// taken as Earth radius plus altitude.
pub fn to_cartesian_km(p: GeoPoint) -> [f64; 3] {
    let r = EARTH_RADIUS_KM + p.altitude_km;
    let (sin_lat, cos_lat) = p.lat_rad().sin_cos();
    let (sin_lon, cos_lon) = p.lon_rad().sin_cos();
    [r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat]
}

/// Straight-line 3-D distance between two points above the curved Earth.
pub fn slant_distance_km(sat: GeoPoint, ground: GeoPoint) -> f64 {
    let s = to_cartesian_km(sat);
    let g = to_cartesian_km(ground);
    let d = [s[0] - g[0], s[1] - g[1], s[2] - g[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

/// Point reached by travelling `distance_km` along the great circle that
/// leaves `origin` at `bearing_deg`, keeping the origin's altitude.
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing_deg.to_radians();
    let (sin_phi1, cos_phi1) = origin.lat_rad().sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let sin_phi2 = (sin_phi1 * cos_delta + cos_phi1 * sin_delta * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();

    let y = theta.sin() * sin_delta * cos_phi1;
    let x = cos_delta - sin_phi1 * sin_phi2;
    let lambda2 = origin.lon_rad() + y.atan2(x);

    GeoPoint {
        latitude_deg: phi2.to_degrees(),
        longitude_deg: (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        altitude_km: origin.altitude_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_points_have_zero_distance() {
        let p = GeoPoint::new(51.4778, -0.0015, 0.0);
        assert_eq!(great_circle_distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(31.8, 35.2, 0.0);
        let b = GeoPoint::new(48.85, 2.35, 0.0);
        assert_eq!(
            great_circle_distance_km(a, b),
            great_circle_distance_km(b, a)
        );
    }

    #[test]
    fn one_degree_along_the_equator() {
        let a = GeoPoint::new(0.0, 0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert_relative_eq!(great_circle_distance_km(a, b), expected, max_relative = 1e-12);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0, 0.0);
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(1.0, 0.0, 0.0)),
            0.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(0.0, 1.0, 0.0)),
            90.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(-1.0, 0.0, 0.0)),
            180.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(0.0, -1.0, 0.0)),
            270.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn bearing_stays_in_range() {
        for lat in [-80.0, -45.0, 0.0, 45.0, 80.0] {
            for lon in [-170.0, -90.0, 0.0, 90.0, 170.0] {
                let a = GeoPoint::new(lat, lon, 0.0);
                let b = GeoPoint::new(-lat + 1.0, -lon + 1.0, 0.0);
                let bearing = initial_bearing_deg(a, b);
                assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
            }
        }
    }

    #[test]
    fn coincident_points_bear_zero() {
        let p = GeoPoint::new(12.3, -45.6, 0.0);
        assert_eq!(initial_bearing_deg(p, p), 0.0);
    }

    #[test]
    fn slant_straight_up_equals_altitude() {
        let ground = GeoPoint::new(31.8, 35.2, 0.0);
        let sat = GeoPoint::new(31.8, 35.2, 420.0);
        assert_relative_eq!(slant_distance_km(sat, ground), 420.0, max_relative = 1e-12);
    }

    #[test]
    fn slant_on_ground_is_the_chord() {
        let a = GeoPoint::new(0.0, 0.0, 0.0);
        let b = GeoPoint::new(0.0, 10.0, 0.0);
        let arc = great_circle_distance_km(a, b);
        let chord = 2.0 * EARTH_RADIUS_KM * (arc / (2.0 * EARTH_RADIUS_KM)).sin();
        assert_relative_eq!(slant_distance_km(a, b), chord, max_relative = 1e-9);
    }

    #[test]
    fn destination_point_round_trips() {
        let origin = GeoPoint::new(31.8, 35.2, 0.0);
        let dest = destination_point(origin, 37.5, 120.0);
        assert_relative_eq!(
            great_circle_distance_km(origin, dest),
            120.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            initial_bearing_deg(origin, dest),
            37.5,
            epsilon = 1e-6
        );
        assert_eq!(dest.altitude_km, 0.0);
    }

    #[test]
    fn destination_longitude_is_normalized() {
        let origin = GeoPoint::new(0.0, 179.5, 0.0);
        let dest = destination_point(origin, 90.0, 200.0);
        assert!((-180.0..=180.0).contains(&dest.longitude_deg));
    }
}
