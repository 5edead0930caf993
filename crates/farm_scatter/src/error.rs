//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover malformed input vectors, sonar lookups outside the grid, invalid settings
//! or outlines, unknown buildings and floors, and IO or parse failures.
//!
//! A generation pass that runs out of rings, layers or cells is not an error; see
//! [`crate::distribution::Degenerate`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("grid index ({row}, {col}) outside {rows}x{cols} sonar grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown building '{id}'")]
    UnknownBuilding { id: String },

    #[error("floor {floor} out of range for building with {floors} floors")]
    FloorOutOfRange { floor: usize, floors: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "ron")]
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[cfg(feature = "json")]
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
