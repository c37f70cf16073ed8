use crate::config::ConfigError;
use crate::inputs::{AttributeError, LookupError, RegistryError, SubmitError};
use crate::telemetry::TelemetryError;

/// Failure surfaced to binaries embedding the widgets.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("widget attribute error: {0}")]
    Attribute(#[from] AttributeError),
    #[error("widget registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("postal lookup error: {0}")]
    Lookup(#[from] LookupError),
    #[error("form submission refused: {0}")]
    Submit(#[from] SubmitError),
    #[error("{0}")]
    Input(String),
}
