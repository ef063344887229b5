/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in radial calculations
//!
//! Energies are in Rydberg and lengths in Bohr radii throughout the crate.

/// Bohr radius in Angstroms
pub const BOHR_RADIUS: f64 = 0.529177;

/// Rydberg energy in eV
pub const RYDBERG: f64 = 13.6057;

/// Conversion from Rydberg to Hartree
pub const RYDBERG_TO_HARTREE: f64 = 0.5;

/// Conversion from Rydberg to eV
pub const RYDBERG_TO_EV: f64 = RYDBERG;

/// Conversion from Hartree to eV
pub const HARTREE_TO_EV: f64 = 2.0 * RYDBERG;
