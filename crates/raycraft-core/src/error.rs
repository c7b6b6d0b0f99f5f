//! Error types shared by the world crates.

use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A byte that is not one of the known block codes
    #[error("Invalid block code: {0}")]
    InvalidBlock(u8),

    /// Grid dimensions that cannot hold a world
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A buffer whose length does not match the grid it should fill
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
