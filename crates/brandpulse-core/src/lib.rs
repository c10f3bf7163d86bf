//! Shared data model and configuration for brandpulse.

pub mod app_config;
pub mod config;
pub mod export;
pub mod mention;
pub mod outcome;
pub mod tracking;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use export::{mentions_to_csv, CSV_COLUMNS};
pub use mention::{
    epoch_seconds, from_epoch_seconds, Mention, ParseLabelError, SentimentLabel, MISSING_AUTHOR,
    NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};
pub use outcome::Outcome;
pub use tracking::{load_tracking, TrackingConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tracking file {path}: {source}")]
    TrackingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tracking file: {0}")]
    TrackingFileParse(#[from] serde_yaml::Error),

    #[error("tracking config validation failed: {0}")]
    Validation(String),
}
