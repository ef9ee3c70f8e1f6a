//! Shared domain types, engagement metrics and configuration for vkpulse.

pub mod app_config;
pub mod config;
pub mod metrics;
pub mod posts;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use metrics::{
    daily_aggregates, engagement_ratio, engagement_ratios, engagement_series, metric_series,
    publication_series, DailyAggregate, MetricPoint,
};
pub use posts::Post;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
