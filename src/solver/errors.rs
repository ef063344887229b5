/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the eigenvalue solver

use crate::grid::GridError;
use thiserror::Error;

/// Result type for eigenvalue calculations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Error type for solving the radial Schrödinger equation
///
/// Every variant aborts the current solve. Diagnostic values are carried in
/// double precision regardless of the working precision.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Quantum numbers, charge or grid parameters are out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The initial energy bracket is empty
    #[error("Lower and upper energy bounds are equal: elw = {lower:.16e}, eup = {upper:.16e}")]
    DegenerateBracket {
        /// Lower bound (minimum of the effective potential)
        lower: f64,
        /// Upper bound (potential at the outer edge)
        upper: f64,
    },

    /// No usable classical turning point for the trial energy
    #[error("Classical turning point not found: icl = {turning_point:?}, mesh = {mesh}, e = {energy:.8e}")]
    ClassicalTurningPointNotFound {
        /// Index of the last sign change, if any
        turning_point: Option<usize>,
        /// Number of grid intervals
        mesh: usize,
        /// Trial energy
        energy: f64,
    },

    /// The iteration budget ran out before the energy correction was small enough
    #[error(
        "Not converged after {iterations} iterations: e = {energy:.8e}, de = {delta:.8e}, \
         elw = {lower:.8e}, eup = {upper:.8e}, ncross = {crossings}, nodes = {nodes}, icl = {turning_point}"
    )]
    ConvergenceFailure {
        /// Iterations performed
        iterations: usize,
        /// Last trial energy
        energy: f64,
        /// Last energy correction
        delta: f64,
        /// Lower energy bound
        lower: f64,
        /// Upper energy bound
        upper: f64,
        /// Sign changes found by the last outward integration
        crossings: usize,
        /// Expected number of nodes
        nodes: usize,
        /// Last classical turning point
        turning_point: usize,
    },

    /// An internal invariant does not hold
    #[error("Fatal inconsistency: {0}")]
    FatalInconsistency(String),

    /// Propagation of error from potential module
    #[error("Potential error: {0}")]
    Potential(#[from] crate::potential::PotentialError),
}

impl From<GridError> for SolverError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidParameter(msg) => SolverError::InvalidParameter(msg),
            GridError::LengthMismatch { .. } => SolverError::FatalInconsistency(err.to_string()),
        }
    }
}
