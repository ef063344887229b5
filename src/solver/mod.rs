/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Eigenvalue solver for the radial Schrödinger equation
//!
//! Bound states are found by shooting: for a trial energy the equation is
//! integrated outward from the nucleus up to the classical turning point and
//! inward from the outer edge, the two branches are matched there, and the kink
//! left at the matching point gives a first-order correction to the energy.
//! While the outward branch has the wrong number of nodes the energy is
//! bisected instead.
//!
//! All working arrays live inside one [`solve_eigenstate`] call, so the
//! function is reentrant and independent states can be solved in parallel.

mod config;
mod errors;
mod numerov;

pub use config::{SolverConfig, DEFAULT_MAX_ITERATIONS};
pub use errors::{Result, SolverError};
pub use numerov::count_nodes;

use crate::grid::RadialGrid;
use crate::utils::Real;
use log::{debug, trace};
use numerov::{auxiliary_function, cusp_correction, integrate_inward, integrate_outward};
use serde::{Deserialize, Serialize};

/// Quantum numbers and nuclear charge of the state to find
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantumState<T> {
    /// Principal quantum number (n >= 1)
    pub n: u32,
    /// Angular momentum quantum number (l < n)
    pub l: u32,
    /// Nuclear charge
    pub zeta: T,
}

impl<T: Real> QuantumState<T> {
    /// Create a state, checking the quantum numbers and charge
    pub fn new(n: u32, l: u32, zeta: T) -> Result<Self> {
        let state = Self { n, l, zeta };
        state.validate()?;
        Ok(state)
    }

    /// Check `n >= 1`, `l < n` and a positive finite charge
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(SolverError::InvalidParameter(
                "principal quantum number must be at least 1".to_string(),
            ));
        }
        if self.l >= self.n {
            return Err(SolverError::InvalidParameter(format!(
                "angular momentum l = {} must be smaller than n = {}",
                self.l, self.n
            )));
        }
        if !self.zeta.is_finite() || self.zeta <= T::zero() {
            return Err(SolverError::InvalidParameter(format!(
                "charge must be positive, got {}",
                self.zeta
            )));
        }
        Ok(())
    }

    /// Number of radial nodes, `n - l - 1`
    pub fn nodes(&self) -> usize {
        (self.n - self.l - 1) as usize
    }
}

/// Converged bound state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Eigenstate<T> {
    /// Eigenvalue in Rydberg
    pub energy: T,
    /// Normalized `y(r) = sqrt(r) R(r)` on every grid point
    pub wavefunction: Vec<T>,
    /// Trial energies used
    pub iterations: usize,
    /// Grid index where the outward and inward branches were matched
    pub turning_point: usize,
    /// Radial nodes of the state
    pub nodes: usize,
    /// Last energy correction
    pub delta: T,
}

impl<T: Real> Eigenstate<T> {
    /// `sum y² r² dx` over the grid, 1 for a normalized state
    pub fn norm(&self, grid: &RadialGrid<T>) -> T {
        weighted_norm(&self.wavefunction, grid.r2(), grid.dx())
    }

    /// Sign changes of the wavefunction between the origin and the turning point
    pub fn count_nodes(&self) -> usize {
        self.wavefunction
            .get(..=self.turning_point)
            .map_or(0, count_nodes)
    }
}

/// Bracket, trial energy and bookkeeping of one search
#[derive(Debug, Clone, Copy)]
struct Iteration<T> {
    energy: T,
    lower: T,
    upper: T,
    delta: T,
    turning_point: usize,
    crossings: usize,
}

impl<T: Real> Iteration<T> {
    fn convergence_failure(&self, iterations: usize, nodes: usize) -> SolverError {
        SolverError::ConvergenceFailure {
            iterations,
            energy: self.energy.as_f64(),
            delta: self.delta.as_f64(),
            lower: self.lower.as_f64(),
            upper: self.upper.as_f64(),
            crossings: self.crossings,
            nodes,
            turning_point: self.turning_point,
        }
    }
}

fn weighted_norm<T: Real>(y: &[T], r2: &[T], dx: T) -> T {
    y.iter()
        .zip(r2)
        .skip(1)
        .fold(T::zero(), |acc, (&yi, &r2i)| acc + yi * yi * r2i * dx)
}

/// Find the bound state `state` of `potential` on `grid`
///
/// `potential` must not include the centrifugal term; the solver adds
/// `(l+1/2)²/r²` itself, as required by the logarithmic-grid transformation.
///
/// # Errors
///
/// * [`SolverError::InvalidParameter`] for bad quantum numbers, charge,
///   settings or a grid too small to hold a turning point
/// * [`SolverError::FatalInconsistency`] if `potential` does not match the
///   grid or the iteration produces non-finite values
/// * [`SolverError::DegenerateBracket`], [`SolverError::ClassicalTurningPointNotFound`]
///   and [`SolverError::ConvergenceFailure`] when the search cannot proceed
pub fn solve_eigenstate<T: Real>(
    state: &QuantumState<T>,
    grid: &RadialGrid<T>,
    potential: &[T],
    config: &SolverConfig,
) -> Result<Eigenstate<T>> {
    state.validate()?;
    config.validate()?;
    grid.check_len("potential", potential.len())?;

    let mesh = grid.mesh();
    if mesh < 4 {
        return Err(SolverError::InvalidParameter(format!(
            "mesh of {} intervals is too small for a turning point",
            mesh
        )));
    }

    let r = grid.r();
    let sqr = grid.sqr();
    let r2 = grid.r2();
    let dx = grid.dx();
    let l = state.l;
    let nodes = state.nodes();
    let tolerance = T::real(config.tolerance);

    let half = T::real(0.5);
    let ddx12 = dx * dx / T::real(12.0);
    let sqlhf = (T::real(l as f64) + half) * (T::real(l as f64) + half);
    let x2l2 = T::real((2 * l + 2) as f64);

    // Rough bounds: bottom of the effective potential and its outer edge
    let upper = potential[mesh];
    let lower = r2
        .iter()
        .zip(potential)
        .fold(upper, |acc, (&r2i, &vi)| acc.min(sqlhf / r2i + vi));

    if upper - lower < tolerance {
        return Err(SolverError::DegenerateBracket {
            lower: lower.as_f64(),
            upper: upper.as_f64(),
        });
    }

    let mut it = Iteration {
        energy: (lower + upper) * half,
        lower,
        upper,
        delta: T::real(1e10),
        turning_point: 0,
        crossings: 0,
    };

    let mut f = vec![T::zero(); mesh + 1];
    let mut y = vec![T::zero(); mesh + 1];
    let mut iterations = 0;

    while iterations < config.max_iterations && it.delta.abs() > config.threshold(it.energy) {
        iterations += 1;

        let icl = match auxiliary_function(&mut f, r2, potential, sqlhf, ddx12, it.energy) {
            Some(icl) if icl < mesh - 2 => icl,
            turning_point => {
                return Err(SolverError::ClassicalTurningPointNotFound {
                    turning_point,
                    mesh,
                    energy: it.energy.as_f64(),
                })
            }
        };
        it.turning_point = icl;

        for (fi, yi) in f.iter_mut().zip(y.iter_mut()) {
            *fi = T::one() - *fi;
            *yi = T::zero();
        }

        // Small-r behaviour: r^(l+1) (1 - 2 zeta r / (2l+2)) / sqrt(r)
        for i in 0..2 {
            y[i] = r[i].powi(l as i32 + 1) * (T::one() - T::real(2.0) * state.zeta * r[i] / x2l2)
                / sqr[i];
        }

        it.crossings = integrate_outward(&mut y, &f, icl);

        trace!(
            "trial {}: e = {:.10e}, elw = {:.10e}, eup = {:.10e}, icl = {}, ncross = {}",
            iterations,
            it.energy,
            it.lower,
            it.upper,
            icl,
            it.crossings
        );

        if it.crossings != nodes {
            if it.crossings > nodes {
                it.upper = it.energy;
            } else {
                it.lower = it.energy;
            }
            it.energy = (it.upper + it.lower) * half;
            if it.upper - it.lower < config.threshold(it.energy) {
                debug!("bisection bracket collapsed at e = {:.10e}", it.energy);
                return Err(it.convergence_failure(iterations, nodes));
            }
            continue;
        }

        let outward = y[icl];
        integrate_inward(&mut y, &f, icl, dx);

        let fac = outward / y[icl];
        if !fac.is_finite() {
            return Err(SolverError::FatalInconsistency(format!(
                "cannot match branches at icl = {}: outward {:e}, inward {:e}",
                icl, outward, y[icl]
            )));
        }
        for yi in &mut y[icl..] {
            *yi = *yi * fac;
        }

        let norm = weighted_norm(&y, r2, dx).sqrt();
        if !norm.is_finite() || norm <= T::zero() {
            return Err(SolverError::FatalInconsistency(format!(
                "wavefunction norm is {:e} at e = {:e}",
                norm, it.energy
            )));
        }
        for yi in y.iter_mut() {
            *yi = *yi / norm;
        }

        let de = cusp_correction(&y, &f, icl, ddx12, dx);
        if !de.is_finite() {
            return Err(SolverError::FatalInconsistency(format!(
                "energy correction is {:e} at e = {:e}, icl = {}",
                de, it.energy, icl
            )));
        }
        it.delta = de;

        if de > T::zero() {
            it.lower = it.energy;
        }
        if de < T::zero() {
            it.upper = it.energy;
        }
        // Far from convergence the correction may overshoot the bracket
        it.energy = (it.energy + de).min(it.upper).max(it.lower);
        if it.upper <= it.lower && de.abs() > config.threshold(it.energy) {
            debug!("bracket closed on e = {:.10e} with de = {:.4e}", it.energy, de);
            return Err(it.convergence_failure(iterations, nodes));
        }
    }

    if it.delta.abs() > config.threshold(it.energy) {
        return Err(it.convergence_failure(iterations, nodes));
    }

    debug!(
        "n = {}, l = {}: convergence achieved at iteration {}, e = {:.10e}, de = {:.8e}",
        state.n, l, iterations, it.energy, it.delta
    );

    Ok(Eigenstate {
        energy: it.energy,
        wavefunction: y,
        iterations,
        turning_point: it.turning_point,
        nodes,
        delta: it.delta,
    })
}
