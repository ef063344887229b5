/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Complete radial calculation for one or more hydrogenic states
//!
//! [`RadialSolver`] chains the three stages: it builds the logarithmic grid
//! scaled to the nuclear charge, evaluates the Coulomb potential, finds the
//! eigenstate and converts the result into the quantities a caller usually
//! wants (`R(r)`, the effective potential, the scaled eigenvalue).

use crate::grid::{build_grid, MeshParameters};
use crate::potential::{effective_potential, CoulombPotential, PotentialSink};
use crate::solver::{solve_eigenstate, QuantumState, Result, SolverConfig};
use crate::utils::Real;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Result of a radial calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialSolution<T> {
    /// The state that was solved
    pub state: QuantumState<T>,
    /// Eigenvalue in Rydberg
    pub energy: T,
    /// `energy * n² / zeta²`, -1 for an exact hydrogenic level
    pub scaled_energy: T,
    /// Trial energies used by the solver
    pub iterations: usize,
    /// Grid index of the matching point
    pub turning_point: usize,
    /// Radial grid
    pub r: Vec<T>,
    /// Radial function `R(r) = y(r) / sqrt(r)`
    pub radial: Vec<T>,
    /// Coulomb potential `-2 zeta / r`
    pub potential: Vec<T>,
    /// Coulomb plus centrifugal potential `V(r) + l(l+1)/r²`
    pub effective_potential: Vec<T>,
    /// Normalized `y(r)` as returned by the solver
    pub wavefunction: Vec<T>,
}

/// Runs grid construction, potential evaluation and the eigenvalue search
#[derive(Debug, Clone)]
pub struct RadialSolver<T> {
    mesh: MeshParameters<T>,
    config: SolverConfig,
}

impl<T: Real> Default for RadialSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> RadialSolver<T> {
    /// Solver with the default mesh and the default settings for `T`
    pub fn new() -> Self {
        Self {
            mesh: MeshParameters::default(),
            config: SolverConfig::for_precision::<T>(),
        }
    }

    /// Set the mesh; the charge scaling always follows the solved state
    pub fn set_mesh(&mut self, xmin: T, dx: T, rmax: T) -> Result<&mut Self> {
        let mesh = MeshParameters::new(xmin, dx, rmax, T::one());
        mesh.validate()?;
        self.mesh = mesh;
        Ok(self)
    }

    /// Set the convergence settings
    pub fn set_config(&mut self, config: SolverConfig) -> Result<&mut Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Mesh used for a nucleus of charge `zeta`
    pub fn mesh_parameters(&self, zeta: T) -> MeshParameters<T> {
        self.mesh.with_zmesh(zeta)
    }

    /// Convergence settings
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve one state
    pub fn solve(&self, state: &QuantumState<T>) -> Result<RadialSolution<T>> {
        self.run(state, None)
    }

    /// Solve one state and export the potential table to `sink`
    pub fn solve_with_sink(
        &self,
        state: &QuantumState<T>,
        sink: &mut dyn PotentialSink,
    ) -> Result<RadialSolution<T>> {
        self.run(state, Some(sink))
    }

    /// Solve independent states in parallel, one result per state, in order
    pub fn solve_batch(&self, states: &[QuantumState<T>]) -> Vec<Result<RadialSolution<T>>> {
        states.par_iter().map(|state| self.solve(state)).collect()
    }

    fn run(
        &self,
        state: &QuantumState<T>,
        sink: Option<&mut dyn PotentialSink>,
    ) -> Result<RadialSolution<T>> {
        // Reject bad input before allocating anything
        state.validate()?;

        let grid = build_grid(&self.mesh_parameters(state.zeta))?;
        let coulomb = CoulombPotential::new(state.zeta)?;
        let potential = match sink {
            Some(sink) => coulomb.evaluate_with_sink(&grid, sink)?,
            None => coulomb.evaluate(&grid)?,
        };

        let eigenstate = solve_eigenstate(state, &grid, &potential, &self.config)?;

        let radial = eigenstate
            .wavefunction
            .iter()
            .zip(grid.sqr())
            .map(|(&y, &sqr)| y / sqr)
            .collect();
        let effective_potential = effective_potential(&potential, &grid, state.l)?;

        let n = T::real(state.n as f64);
        let scaled_energy = eigenstate.energy * n * n / (state.zeta * state.zeta);

        info!(
            "n = {}, l = {}, zeta = {}: eigenvalue = {:16.8e}, eig*(n/zeta)^2 = {:16.8e}",
            state.n, state.l, state.zeta, eigenstate.energy, scaled_energy
        );

        Ok(RadialSolution {
            state: *state,
            energy: eigenstate.energy,
            scaled_energy,
            iterations: eigenstate.iterations,
            turning_point: eigenstate.turning_point,
            r: grid.r().to_vec(),
            radial,
            potential,
            effective_potential,
            wavefunction: eigenstate.wavefunction,
        })
    }
}

/// Solve a hydrogenic state with the default mesh and settings
pub fn solve_radial(n: u32, l: u32, zeta: f64) -> Result<RadialSolution<f64>> {
    let state = QuantumState::new(n, l, zeta)?;
    RadialSolver::new().solve(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::MemorySink;
    use crate::solver::SolverError;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_radial_default_sample() {
        let solution = solve_radial(2, 1, 1.0).unwrap();

        assert_relative_eq!(solution.energy, -0.25, epsilon = 1e-4);
        assert_relative_eq!(solution.scaled_energy, -1.0, epsilon = 4e-4);
        assert_eq!(solution.r.len(), 1261);
        assert_eq!(solution.radial.len(), solution.r.len());
        assert_eq!(solution.effective_potential.len(), solution.r.len());

        for i in 0..solution.r.len() {
            let r = solution.r[i];
            assert_relative_eq!(
                solution.effective_potential[i],
                solution.potential[i] + 2.0 / (r * r),
                max_relative = 1e-12
            );
            assert_relative_eq!(
                solution.radial[i] * r.sqrt(),
                solution.wavefunction[i],
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_zero_charge_rejected() {
        let state = QuantumState {
            n: 1,
            l: 0,
            zeta: 0.0,
        };
        let result = RadialSolver::<f64>::new().solve(&state);
        assert!(matches!(result, Err(SolverError::InvalidParameter(_))));
    }

    #[test]
    fn test_sink_gets_potential() {
        let state = QuantumState::new(1, 0, 1.0).unwrap();
        let mut sink = MemorySink::new();
        let solution = RadialSolver::new().solve_with_sink(&state, &mut sink).unwrap();

        assert_eq!(sink.table.len(), solution.r.len());
        assert_eq!(sink.table[10], (solution.r[10], solution.potential[10]));
    }

    #[test]
    fn test_set_mesh_validates() {
        let mut solver = RadialSolver::<f64>::new();
        assert!(solver.set_mesh(-8.0, 0.0, 100.0).is_err());
        assert!(solver.set_mesh(-8.0, 0.01, -1.0).is_err());
        assert!(solver.set_mesh(-7.0, 0.02, 60.0).is_ok());
        assert_eq!(solver.mesh_parameters(2.0).zmesh, 2.0);
        assert_eq!(solver.mesh_parameters(2.0).dx, 0.02);
    }
}
