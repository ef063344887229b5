/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions and the floating-point abstraction
//!
//! Every numerical component is generic over [`Real`], which is implemented
//! for `f32` and `f64`. The precision is picked by the caller.

pub mod constants;

use num_traits::Float;
use std::fmt::{Debug, Display, LowerExp};

/// Floating-point type the grid, potential and solver are generic over
pub trait Real: Float + Debug + Display + LowerExp + Default + Send + Sync + 'static {
    /// Default tolerance on the energy correction for this width
    const DEFAULT_TOLERANCE: f64;

    /// Whether the default tolerance scales with the size of the eigenvalue
    const RELATIVE_TOLERANCE: bool;

    /// Short name of the type, used in logs
    const NAME: &'static str;

    /// Convert an `f64` literal into this type (rounding for `f32`)
    fn real(value: f64) -> Self;

    /// Widen the value to `f64`
    fn as_f64(self) -> f64;
}

impl Real for f64 {
    const DEFAULT_TOLERANCE: f64 = 1e-10;
    const RELATIVE_TOLERANCE: bool = false;
    const NAME: &'static str = "f64";

    #[inline]
    fn real(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

impl Real for f32 {
    const DEFAULT_TOLERANCE: f64 = 5e-4;
    const RELATIVE_TOLERANCE: bool = true;
    const NAME: &'static str = "f32";

    #[inline]
    fn real(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// Closed-form energy of a hydrogenic level in Rydberg: `-zeta² / n²`
pub fn hydrogenic_energy(n: u32, zeta: f64) -> f64 {
    let n = n as f64;
    -zeta * zeta / (n * n)
}

/// Convert from Angstroms to Bohr radii
pub fn angstrom_to_bohr(angstrom: f64) -> f64 {
    angstrom / constants::BOHR_RADIUS
}

/// Convert from Bohr radii to Angstroms
pub fn bohr_to_angstrom(bohr: f64) -> f64 {
    bohr * constants::BOHR_RADIUS
}

/// Convert energy from Rydberg to eV
pub fn rydberg_to_ev(rydberg: f64) -> f64 {
    rydberg * constants::RYDBERG_TO_EV
}

/// Convert energy from Rydberg to Hartree
pub fn rydberg_to_hartree(rydberg: f64) -> f64 {
    rydberg * constants::RYDBERG_TO_HARTREE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_conversions() {
        let angstrom = 1.0;
        let bohr = angstrom_to_bohr(angstrom);
        assert_relative_eq!(bohr_to_angstrom(bohr), angstrom, epsilon = 1e-10);

        // 1 Ry is half a Hartree
        assert_relative_eq!(rydberg_to_hartree(-1.0), -0.5, epsilon = 1e-12);
        assert_relative_eq!(
            rydberg_to_ev(1.0),
            constants::HARTREE_TO_EV / 2.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_hydrogenic_energy() {
        assert_relative_eq!(hydrogenic_energy(1, 1.0), -1.0);
        assert_relative_eq!(hydrogenic_energy(2, 1.0), -0.25);
        assert_relative_eq!(hydrogenic_energy(3, 2.0), -4.0 / 9.0);
    }

    #[test]
    fn test_real_round_trip() {
        assert_eq!(<f64 as Real>::real(0.01), 0.01);
        assert_relative_eq!(<f32 as Real>::real(0.01).as_f64(), 0.01, epsilon = 1e-8);
        assert!(<f32 as Real>::DEFAULT_TOLERANCE > <f64 as Real>::DEFAULT_TOLERANCE);
    }
}
