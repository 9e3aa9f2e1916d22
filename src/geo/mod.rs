mod point;
mod sphere;

pub use point::GeoPoint;
pub use sphere::{
    destination_point, great_circle_distance_km, initial_bearing_deg, slant_distance_km,
    to_cartesian_km, EARTH_RADIUS_KM,
};
