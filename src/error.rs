use thiserror::Error;

/// Top-level error type for the thermwatch kernel.
///
/// Only construction can fail. Once a [`crate::pipeline::ThermalPipeline`]
/// exists, every state change is total.
#[derive(Debug, Error)]
pub enum ThermwatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// Errors raised while validating or loading a [`crate::config::FurnaceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("grid dimension {axis} = {value} must be at least 2")]
    GridTooSmall { axis: &'static str, value: usize },

    #[error("color range [{lo}, {hi}] is empty or inverted")]
    InvalidColorRange { lo: f64, hi: f64 },

    #[error("parameter {parameter} = {value} must be positive")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by the live sensor feed.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor window must hold at least one sample")]
    EmptyWindow,

    #[error("sensor tick interval must be non-zero")]
    ZeroInterval,
}

/// Convenience type alias for results using [`ThermwatchError`].
pub type Result<T> = std::result::Result<T, ThermwatchError>;
