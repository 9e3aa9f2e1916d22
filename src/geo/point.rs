use serde::{Deserialize, Serialize};

/// Geodetic position on the spherical Earth model used throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_km: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    /// Parse a "lat, lon" coordinate pair, e.g. "31.8, 35.2".
    pub fn from_coordinates(coordinates: &str, altitude_km: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat = parts[0].parse().ok()?;
        let lon = parts[1].parse().ok()?;
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_km: altitude_km.unwrap_or(0.0),
        })
    }

    /// Ground projection: same latitude/longitude with altitude forced to zero.
    pub fn ground(&self) -> Self {
        Self {
            altitude_km: 0.0,
            ..*self
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}
