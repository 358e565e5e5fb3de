use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum ModelboardError {
    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),

    #[error("Invalid payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ModelboardError>;
