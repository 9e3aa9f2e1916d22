use chrono::Duration;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::rate::HeadingWrap;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub targets: Option<TargetPlanConfig>,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(
        default = "default_update_interval",
        deserialize_with = "parse_duration"
    )]
    pub update_interval: Duration,
    #[serde(default)]
    pub range_offset_m: f64,
    #[serde(default)]
    pub heading_wrap: HeadingWrap,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            update_interval: default_update_interval(),
            range_offset_m: 0.0,
            heading_wrap: HeadingWrap::default(),
        }
    }
}

fn default_update_interval() -> Duration {
    Duration::seconds(5)
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetPlanConfig {
    #[serde(deserialize_with = "parse_duration")]
    pub window: Duration,
    #[serde(deserialize_with = "parse_duration")]
    pub interval: Duration,
    #[serde(default)]
    pub shift: Option<ShiftPlanConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShiftPlanConfig {
    pub max_shift_km: f64,
    pub shift_prob: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: Option<String>,
    pub coordinates: String,
}

impl SiteConfig {
    pub fn to_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_coordinates(&self.coordinates, None)
    }
}

fn parse_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let parsed = humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)?;
    Duration::from_std(parsed).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.into()));

        if self.session.update_interval <= Duration::zero() {
            return invalid("update_interval must be positive");
        }
        if let Some(ref plan) = self.targets {
            if plan.interval <= Duration::zero() {
                return invalid("targets.interval must be positive");
            }
            if plan.window < Duration::zero() {
                return invalid("targets.window must not be negative");
            }
            if let Some(shift) = plan.shift {
                if !(0.0..=1.0).contains(&shift.shift_prob) {
                    return invalid("targets.shift.shift_prob must be within [0, 1]");
                }
                if shift.max_shift_km < 0.0 {
                    return invalid("targets.shift.max_shift_km must not be negative");
                }
            }
        }
        for site in &self.sites {
            if site.to_point().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "unparseable site coordinates: {}",
                    site.coordinates
                )));
            }
        }
        Ok(())
    }

    /// Ground points for every configured fixed site.
    pub fn site_points(&self) -> Result<Vec<GeoPoint>, ConfigError> {
        self.sites
            .iter()
            .map(|site| {
                site.to_point().ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "unparseable site coordinates: {}",
                        site.coordinates
                    ))
                })
            })
            .collect()
    }
}
