//! Error types for Domex Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
