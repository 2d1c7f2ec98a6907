pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod observation;

use thiserror::Error;

pub use aggregate::{process_observations, summarize};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, parse_days_back, MAX_DAYS_BACK};
pub use observation::{format_timestamp, Observation, Sighting, Snapshot, SpeciesGroup};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
