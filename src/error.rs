use thiserror::Error;

/// Engine error types.
///
/// Malformed market data never produces an error: the engine degrades to
/// sentinel results instead (see `Action::InsufficientData`). Errors are
/// reserved for configuration problems caught at load time and for I/O at
/// the driver boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
