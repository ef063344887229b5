/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! JSON run configuration
//!
//! Every field is optional. Missing values fall back to the library defaults
//! and command-line flags override whatever the file sets.
//!
//! ```json
//! {
//!   "mesh": { "xmin": -8.0, "dx": 0.01, "rmax": 100.0 },
//!   "solver": { "tolerance": 1e-10, "max_iterations": 100, "relative_tolerance": false }
//! }
//! ```

use crate::grid::MeshParameters;
use crate::solver::SolverConfig;
use crate::utils::Real;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mesh section of the configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeshSettings {
    /// Log-coordinate of the first grid point
    pub xmin: Option<f64>,
    /// Step of the log-coordinate
    pub dx: Option<f64>,
    /// Outer radius in Bohr
    pub rmax: Option<f64>,
}

/// Solver section of the configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    /// Convergence threshold on the energy correction
    pub tolerance: Option<f64>,
    /// Maximum number of trial energies
    pub max_iterations: Option<usize>,
    /// Scale the threshold with the eigenvalue
    pub relative_tolerance: Option<bool>,
}

/// Settings for one run of the command-line tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Mesh section
    pub mesh: MeshSettings,
    /// Solver section
    pub solver: SolverSettings,
}

impl RunConfig {
    /// Read a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Replace file values with the ones given on the command line
    pub fn merge(&mut self, other: &RunConfig) {
        self.mesh.xmin = other.mesh.xmin.or(self.mesh.xmin);
        self.mesh.dx = other.mesh.dx.or(self.mesh.dx);
        self.mesh.rmax = other.mesh.rmax.or(self.mesh.rmax);
        self.solver.tolerance = other.solver.tolerance.or(self.solver.tolerance);
        self.solver.max_iterations = other.solver.max_iterations.or(self.solver.max_iterations);
        self.solver.relative_tolerance = other
            .solver
            .relative_tolerance
            .or(self.solver.relative_tolerance);
    }

    /// Mesh parameters in the working precision (charge scaling left at 1)
    pub fn mesh_parameters<T: Real>(&self) -> MeshParameters<T> {
        let defaults = MeshParameters::<T>::default();
        MeshParameters::new(
            self.mesh.xmin.map(T::real).unwrap_or(defaults.xmin),
            self.mesh.dx.map(T::real).unwrap_or(defaults.dx),
            self.mesh.rmax.map(T::real).unwrap_or(defaults.rmax),
            defaults.zmesh,
        )
    }

    /// Solver settings, with the defaults of the working precision
    pub fn solver_config<T: Real>(&self) -> SolverConfig {
        let defaults = SolverConfig::for_precision::<T>();
        SolverConfig {
            tolerance: self.solver.tolerance.unwrap_or(defaults.tolerance),
            max_iterations: self.solver.max_iterations.unwrap_or(defaults.max_iterations),
            relative_tolerance: self
                .solver
                .relative_tolerance
                .unwrap_or(defaults.relative_tolerance),
        }
    }
}
