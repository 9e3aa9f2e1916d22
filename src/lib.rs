//! Camera-targeting core for satellite tracking: geodesy primitives,
//! nearest-target selection, camera pose derivation, angular-rate tracking
//! and target-set generation. Propagation, transport and rendering live in
//! the surrounding services.

pub mod geo;
pub mod propagator;
pub mod rate;
pub mod session;
pub mod targeting;
pub mod targets;

pub use geo::{
    destination_point, great_circle_distance_km, initial_bearing_deg, slant_distance_km,
    GeoPoint, EARTH_RADIUS_KM,
};
pub use propagator::{PropagationError, Propagator};
pub use rate::{compute_rate, HeadingWrap, RateError, RateSample, RateTracker};
pub use session::{Config, ConfigError, Session, SessionError, SessionMode, SessionStatus};
pub use targeting::{compute_camera_view, select_nearest_target, CameraView, TargetingError};
pub use targets::{generate_shifted_targets, generate_targets, GenerateError, ShiftConfig};
