/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Logarithmic radial grid
//!
//! The grid is uniform in the log-coordinate `x = ln(zmesh * r)`:
//! `r(i) = exp(xmin + i*dx) / zmesh` for `i = 0..=mesh`. It is dense near the
//! nucleus and coarse far away, which matches the scale on which atomic
//! wavefunctions vary.
//!
//! The mesh size is computed in exactly one place, [`MeshParameters::mesh_size`],
//! and carried by [`RadialGrid`] from then on. Downstream components check their
//! array lengths against it with [`RadialGrid::check_len`].

mod errors;

pub use errors::{GridError, Result};

use crate::utils::Real;
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters of the logarithmic mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshParameters<T> {
    /// Log-coordinate of the first grid point
    pub xmin: T,
    /// Step of the log-coordinate
    pub dx: T,
    /// Outer radius in Bohr
    pub rmax: T,
    /// Charge the mesh is scaled with
    pub zmesh: T,
}

impl<T: Real> Default for MeshParameters<T> {
    fn default() -> Self {
        Self {
            xmin: T::real(-8.0),
            dx: T::real(0.01),
            rmax: T::real(100.0),
            zmesh: T::one(),
        }
    }
}

impl<T: Real> MeshParameters<T> {
    /// Create mesh parameters from explicit values
    pub fn new(xmin: T, dx: T, rmax: T, zmesh: T) -> Self {
        Self {
            xmin,
            dx,
            rmax,
            zmesh,
        }
    }

    /// Default mesh scaled to the given nuclear charge
    pub fn for_charge(zeta: T) -> Self {
        Self::default().with_zmesh(zeta)
    }

    /// Same parameters with a different mesh charge
    pub fn with_zmesh(mut self, zmesh: T) -> Self {
        self.zmesh = zmesh;
        self
    }

    /// Check that every parameter is finite and in range
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("xmin", self.xmin, false),
            ("dx", self.dx, true),
            ("rmax", self.rmax, true),
            ("zmesh", self.zmesh, true),
        ];

        for (name, value, positive) in checks {
            if !value.is_finite() {
                return Err(GridError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
            if positive && value <= T::zero() {
                return Err(GridError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Number of grid intervals: `floor((ln(zmesh*rmax) - xmin) / dx)`
    ///
    /// Every array on the grid has `mesh_size() + 1` elements.
    pub fn mesh_size(&self) -> Result<usize> {
        self.validate()?;

        let steps = (((self.zmesh * self.rmax).ln() - self.xmin) / self.dx).floor();
        if !steps.is_finite() || steps < T::zero() {
            return Err(GridError::InvalidParameter(format!(
                "ln(zmesh*rmax) = {} lies below xmin = {}",
                (self.zmesh * self.rmax).ln(),
                self.xmin
            )));
        }

        steps.to_usize().ok_or_else(|| {
            GridError::InvalidParameter(format!("mesh size {} does not fit in usize", steps))
        })
    }
}

/// Radial grid with its derived arrays
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid<T> {
    mesh: usize,
    dx: T,
    r: Vec<T>,
    sqr: Vec<T>,
    r2: Vec<T>,
}

impl<T: Real> RadialGrid<T> {
    /// Wrap externally supplied arrays
    ///
    /// The three arrays must have the same length (at least two points), the
    /// radii must be positive and strictly increasing, and `dx` must be the
    /// log-step they were generated with.
    pub fn from_arrays(dx: T, r: Vec<T>, sqr: Vec<T>, r2: Vec<T>) -> Result<Self> {
        if !dx.is_finite() || dx <= T::zero() {
            return Err(GridError::InvalidParameter(format!(
                "dx must be positive, got {}",
                dx
            )));
        }
        if r.len() < 2 {
            return Err(GridError::InvalidParameter(format!(
                "grid needs at least 2 points, got {}",
                r.len()
            )));
        }

        let grid = Self {
            mesh: r.len() - 1,
            dx,
            r,
            sqr,
            r2,
        };
        grid.check_len("sqr", grid.sqr.len())?;
        grid.check_len("r2", grid.r2.len())?;

        for (i, &ri) in grid.r.iter().enumerate() {
            if !ri.is_finite() || ri <= T::zero() {
                return Err(GridError::InvalidParameter(format!(
                    "r[{}] = {} is not a positive radius",
                    i, ri
                )));
            }
            if i > 0 && ri <= grid.r[i - 1] {
                return Err(GridError::InvalidParameter(format!(
                    "radii must be strictly increasing: r[{}] = {} after r[{}] = {}",
                    i,
                    ri,
                    i - 1,
                    grid.r[i - 1]
                )));
            }
        }

        Ok(grid)
    }

    /// Build a grid from radii alone, deriving `sqrt(r)` and `r²`
    pub fn from_radii(dx: T, r: Vec<T>) -> Result<Self> {
        let sqr = r.iter().map(|&ri| ri.sqrt()).collect();
        let r2 = r.iter().map(|&ri| ri * ri).collect();
        Self::from_arrays(dx, r, sqr, r2)
    }

    /// Number of grid intervals; the arrays hold `mesh + 1` points
    pub fn mesh(&self) -> usize {
        self.mesh
    }

    /// Number of grid points (`mesh + 1`)
    pub fn len(&self) -> usize {
        self.mesh + 1
    }

    /// A grid always holds at least two points
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Step of the log-coordinate
    pub fn dx(&self) -> T {
        self.dx
    }

    /// Radius at each grid point
    pub fn r(&self) -> &[T] {
        &self.r
    }

    /// Square root of the radius at each grid point
    pub fn sqr(&self) -> &[T] {
        &self.sqr
    }

    /// Radius squared at each grid point
    pub fn r2(&self) -> &[T] {
        &self.r2
    }

    /// Check that an array parallel to this grid has `mesh + 1` elements
    pub fn check_len(&self, name: &str, len: usize) -> Result<()> {
        if len != self.len() {
            return Err(GridError::LengthMismatch {
                name: name.to_string(),
                expected: self.len(),
                actual: len,
            });
        }
        Ok(())
    }
}

/// Construct the logarithmic grid described by `params`
pub fn build_grid<T: Real>(params: &MeshParameters<T>) -> Result<RadialGrid<T>> {
    let mesh = params.mesh_size()?;

    let mut r = Vec::with_capacity(mesh + 1);
    let mut sqr = Vec::with_capacity(mesh + 1);
    let mut r2 = Vec::with_capacity(mesh + 1);

    for i in 0..=mesh {
        let x = params.xmin + params.dx * T::real(i as f64);
        let ri = x.exp() / params.zmesh;
        r.push(ri);
        sqr.push(ri.sqrt());
        r2.push(ri * ri);
    }

    debug!(
        "radial grid ({}): dx = {:.6}, xmin = {:.6}, zmesh = {:.6}, mesh = {}, r(0) = {:.6e}, r(mesh) = {:.6}",
        T::NAME,
        params.dx,
        params.xmin,
        params.zmesh,
        mesh,
        r[0],
        r[mesh]
    );

    Ok(RadialGrid {
        mesh,
        dx: params.dx,
        r,
        sqr,
        r2,
    })
}
