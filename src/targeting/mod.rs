mod camera;
mod error;
mod select;

pub use camera::{compute_camera_view, CameraView};
pub use error::TargetingError;
pub use select::select_nearest_target;
