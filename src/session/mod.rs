mod config;
mod error;
mod session;

pub use config::{Config, ConfigError, SessionConfig, ShiftPlanConfig, SiteConfig, TargetPlanConfig};
pub use error::SessionError;
pub use session::{PositionSample, Session, SessionMode, SessionStatus};
