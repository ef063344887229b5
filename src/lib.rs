/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # hydrogen-radial
//!
//! Bound states of hydrogen-like atoms from the radial Schrödinger equation.
//!
//! The equation is integrated with the Numerov method on a logarithmic grid;
//! the eigenvalue is found by shooting from both ends towards the classical
//! turning point, bisecting on the node count and refining with a first-order
//! perturbative correction. Energies are in Rydberg, lengths in Bohr radii.
//!
//! ```no_run
//! use hydrogen_radial::solve_radial;
//!
//! let solution = solve_radial(2, 1, 1.0)?;
//! println!("E(2p) = {} Ry", solution.energy);
//! # Ok::<(), hydrogen_radial::solver::SolverError>(())
//! ```
//!
//! The pipeline can also be driven stage by stage with [`grid::build_grid`],
//! [`potential::evaluate_potential`] and [`solver::solve_eigenstate`], in
//! either `f32` or `f64`.

pub mod cli;
pub mod grid;
pub mod potential;
pub mod radial;
pub mod solver;
pub mod utils;

pub use grid::{build_grid, MeshParameters, RadialGrid};
pub use potential::{evaluate_potential, CoulombPotential, PotentialSink, TableSink};
pub use radial::{solve_radial, RadialSolution, RadialSolver};
pub use solver::{solve_eigenstate, Eigenstate, QuantumState, SolverConfig, SolverError};
pub use utils::Real;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
