pub mod app_config;
pub mod brands;
pub mod config;
pub mod dashboard;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brands, Brand, BrandEntry, BrandsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::{DashboardConfig, DataSource, DateRange, ParseDataSourceError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
