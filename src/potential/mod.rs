/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Potential evaluation module
//!
//! The nucleus is modelled as a point charge `zeta`, giving the attractive
//! Coulomb potential `V(r) = -2*zeta/r` in Rydberg units. The centrifugal term
//! is not part of `V`; [`effective_potential`] adds it for callers that want it.

mod errors;
mod sink;

pub use errors::{PotentialError, Result};
pub use sink::{MemorySink, PotentialSink, TableSink};

use crate::grid::RadialGrid;
use crate::utils::Real;
use log::debug;

/// Evaluate `V(r) = -2*zeta/r` at each radius
///
/// Radii are checked at this boundary since they may come from outside the
/// grid builder.
pub fn evaluate_potential<T: Real>(zeta: T, r: &[T]) -> Result<Vec<T>> {
    if !zeta.is_finite() || zeta <= T::zero() {
        return Err(PotentialError::InvalidParameter(format!(
            "charge must be positive, got {}",
            zeta
        )));
    }

    let two_zeta = T::real(2.0) * zeta;
    r.iter()
        .enumerate()
        .map(|(index, &ri)| {
            if ri <= T::zero() || ri.is_nan() {
                return Err(PotentialError::DivisionByZero {
                    index,
                    radius: ri.as_f64(),
                });
            }
            Ok(-two_zeta / ri)
        })
        .collect()
}

/// Add the centrifugal term `l(l+1)/r²` to a potential
pub fn effective_potential<T: Real>(v: &[T], grid: &RadialGrid<T>, l: u32) -> Result<Vec<T>> {
    grid.check_len("potential", v.len())?;

    let ll = T::real((l * (l + 1)) as f64);
    Ok(v.iter()
        .zip(grid.r2())
        .map(|(&vi, &r2)| vi + ll / r2)
        .collect())
}

/// Attractive point-charge potential on a radial grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombPotential<T> {
    zeta: T,
}

impl<T: Real> CoulombPotential<T> {
    /// Create the potential of a nucleus with charge `zeta`
    pub fn new(zeta: T) -> Result<Self> {
        if !zeta.is_finite() || zeta <= T::zero() {
            return Err(PotentialError::InvalidParameter(format!(
                "charge must be positive, got {}",
                zeta
            )));
        }
        Ok(Self { zeta })
    }

    /// Nuclear charge
    pub fn zeta(&self) -> T {
        self.zeta
    }

    /// Evaluate the potential on every point of the grid
    pub fn evaluate(&self, grid: &RadialGrid<T>) -> Result<Vec<T>> {
        let v = evaluate_potential(self.zeta, grid.r())?;
        grid.check_len("potential", v.len())?;

        debug!(
            "coulomb potential: zeta = {}, V(r0) = {:.6e}, V(rmax) = {:.6e}",
            self.zeta,
            v[0],
            v[grid.mesh()]
        );
        Ok(v)
    }

    /// Evaluate the potential and hand the `(r, V)` table to a sink
    pub fn evaluate_with_sink(
        &self,
        grid: &RadialGrid<T>,
        sink: &mut dyn PotentialSink,
    ) -> Result<Vec<T>> {
        let v = self.evaluate(grid)?;

        let r: Vec<f64> = grid.r().iter().map(|&ri| ri.as_f64()).collect();
        let table: Vec<f64> = v.iter().map(|&vi| vi.as_f64()).collect();
        sink.record(&r, &table)?;

        Ok(v)
    }
}
