//! Error types for the vitrine crates

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions: width {width} and height {height} must be above zero")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
