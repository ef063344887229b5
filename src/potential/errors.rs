/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for potential evaluation

use thiserror::Error;

/// Result type for potential calculations
pub type Result<T> = std::result::Result<T, PotentialError>;

/// Error type for potential-related operations
#[derive(Error, Debug)]
pub enum PotentialError {
    /// Charge or another scalar input is out of range
    #[error("Invalid potential parameter: {0}")]
    InvalidParameter(String),

    /// A radius at which the potential was requested is zero or negative
    #[error("Division by zero: r[{index}] = {radius:e} is not a positive radius")]
    DivisionByZero {
        /// Grid index of the offending radius
        index: usize,
        /// The radius value
        radius: f64,
    },

    /// The potential sink could not record the table
    #[error("Failed to export potential: {0}")]
    Sink(#[from] std::io::Error),

    /// Propagation of error from grid module
    #[error("Grid error: {0}")]
    Grid(#[from] crate::grid::GridError),
}
