/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration for the eigenvalue search

use super::errors::{Result, SolverError};
use crate::utils::Real;
use serde::{Deserialize, Serialize};

/// Default cap on trial energies per solve
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Convergence settings for the shooting search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence threshold on the energy correction, in Rydberg
    pub tolerance: f64,
    /// Maximum number of trial energies
    pub max_iterations: usize,
    /// Scale the threshold by `max(1, |e|)` instead of using it as is
    #[serde(default)]
    pub relative_tolerance: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::for_precision::<f64>()
    }
}

impl SolverConfig {
    /// Default settings for the given working precision
    pub fn for_precision<T: Real>() -> Self {
        Self {
            tolerance: T::DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            relative_tolerance: T::RELATIVE_TOLERANCE,
        }
    }

    /// Largest energy correction accepted as converged at `energy`
    pub fn threshold<T: Real>(&self, energy: T) -> T {
        let tolerance = T::real(self.tolerance);
        if self.relative_tolerance {
            tolerance * energy.abs().max(T::one())
        } else {
            tolerance
        }
    }

    /// Check that the settings allow a search to run
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.max_iterations, 100);
        assert!(config.validate().is_ok());

        assert!(!config.relative_tolerance);

        let single = SolverConfig::for_precision::<f32>();
        assert!(single.tolerance > config.tolerance);
        assert!(single.relative_tolerance);
    }

    #[test]
    fn test_threshold() {
        let absolute = SolverConfig::default();
        assert_eq!(absolute.threshold(-900.0), 1e-10);

        let relative = SolverConfig {
            tolerance: 1e-3,
            relative_tolerance: true,
            ..SolverConfig::default()
        };
        assert_relative_eq!(relative.threshold(-900.0f64), 0.9);
        // Below 1 Ry the threshold stays absolute
        assert_eq!(relative.threshold(-0.25f64), 1e-3);
    }

    #[test]
    fn test_validation() {
        let mut config = SolverConfig::default();
        config.tolerance = 0.0;
        assert!(config.validate().is_err());

        config.tolerance = 1e-8;
        config.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{ "tolerance": 1e-8, "max_iterations": 50 }"#;
        let config: SolverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 50);
        assert!(!config.relative_tolerance);
    }
}
