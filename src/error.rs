use crate::analysis::TransportError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Application-level error for the CLI pipeline. Only fatal setup and I/O
/// failures surface here; per-clause analysis failures are absorbed into
/// fallback results inside the engine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input document: {0}")]
    Input(#[from] serde_json::Error),
    #[error("reasoning transport setup failed: {0}")]
    Transport(#[from] TransportError),
}
