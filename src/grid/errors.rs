/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for radial grid construction

use thiserror::Error;

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Error type for grid-related operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A mesh parameter is out of its valid range
    #[error("Invalid mesh parameter: {0}")]
    InvalidParameter(String),

    /// An array does not have the `mesh + 1` elements the grid requires
    #[error("Array '{name}' has {actual} elements, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array
        name: String,
        /// Required length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}
