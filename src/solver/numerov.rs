/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerov integration on the logarithmic grid
//!
//! With `x = ln r` and `y = sqrt(r) * R(r)` the radial equation takes the form
//! `y'' = -g(x) y` and the Numerov recurrence
//!
//! `f(i+1) y(i+1) = (12 - 10 f(i)) y(i) - f(i-1) y(i-1)`
//!
//! with `f = 1 - dx²/12 * g` is fourth-order accurate without any first
//! derivative term. The helpers here operate in place on slices that span the
//! whole grid (`mesh + 1` points).

use crate::utils::Real;

/// Replacement for an exact zero of the auxiliary function
const ZERO_GUARD: f64 = 1e-20;

/// Magnitude above which the inward solution is rescaled
const OVERFLOW_GUARD: f64 = 1e10;

/// True when `b` has the opposite sign to a non-zero `a`
#[inline]
pub(crate) fn changes_sign<T: Real>(a: T, b: T) -> bool {
    a != T::zero() && a.is_sign_negative() != b.is_sign_negative()
}

/// Count the sign changes between consecutive values
pub fn count_nodes<T: Real>(y: &[T]) -> usize {
    y.windows(2).filter(|w| changes_sign(w[0], w[1])).count()
}

/// Fill `f` with `dx²/12 * ((l+1/2)² + r²(V - e))` and find the turning point
///
/// Returns the index of the last sign change of `f`, scanning outward.
/// `f < 0` marks the classically allowed region, `f > 0` the forbidden one.
/// An exact zero is nudged to a tiny positive value so no crossing is lost.
pub(crate) fn auxiliary_function<T: Real>(
    f: &mut [T],
    r2: &[T],
    v: &[T],
    sqlhf: T,
    ddx12: T,
    energy: T,
) -> Option<usize> {
    let guard = T::real(ZERO_GUARD);
    let mut turning_point = None;

    for i in 0..f.len() {
        let mut fi = ddx12 * (sqlhf + r2[i] * (v[i] - energy));
        if fi == T::zero() {
            fi = guard;
        }
        f[i] = fi;

        if i > 0 && fi.is_sign_negative() != f[i - 1].is_sign_negative() {
            turning_point = Some(i);
        }
    }

    turning_point
}

/// Integrate outward from the two seeded points up to `icl`
///
/// Expects `f` already rescaled to `1 - f`. Returns the number of sign
/// changes of `y` on `[0, icl]`.
pub(crate) fn integrate_outward<T: Real>(y: &mut [T], f: &[T], icl: usize) -> usize {
    let twelve = T::real(12.0);
    let ten = T::real(10.0);
    let mut crossings = 0;

    for i in 1..icl {
        y[i + 1] = ((twelve - ten * f[i]) * y[i] - f[i - 1] * y[i - 1]) / f[i + 1];
        if changes_sign(y[i], y[i + 1]) {
            crossings += 1;
        }
    }

    crossings
}

/// Integrate inward from the outer edge down to `icl`
///
/// Seeds `y(mesh) = dx` and assumes `y(mesh + 1) = 0`. Whenever a value grows
/// past 1e10 in magnitude, everything computed so far is divided by it; only
/// the shape of the inward branch matters since it is rescaled at `icl`.
pub(crate) fn integrate_inward<T: Real>(y: &mut [T], f: &[T], icl: usize, dx: T) {
    let twelve = T::real(12.0);
    let ten = T::real(10.0);
    let guard = T::real(OVERFLOW_GUARD);
    let mesh = y.len() - 1;

    y[mesh] = dx;
    y[mesh - 1] = (twelve - ten * f[mesh]) * y[mesh] / f[mesh - 1];

    for i in (icl + 1..mesh).rev() {
        y[i - 1] = ((twelve - ten * f[i]) * y[i] - f[i + 1] * y[i + 1]) / f[i - 1];

        let scale = y[i - 1];
        if scale.abs() > guard {
            for yj in &mut y[i - 1..] {
                *yj = *yj / scale;
            }
        }
    }
}

/// Energy correction from the derivative discontinuity at `icl`
///
/// `ycusp` is the value the Numerov recurrence would give at `icl` from its
/// two neighbours; the mismatch with `y(icl)` measures the kink, and
/// first-order perturbation theory turns it into `de`.
pub(crate) fn cusp_correction<T: Real>(y: &[T], f: &[T], icl: usize, ddx12: T, dx: T) -> T {
    let i = icl;
    let ycusp = (y[i - 1] * f[i - 1] + f[i + 1] * y[i + 1] + T::real(10.0) * f[i] * y[i])
        / T::real(12.0);
    let dfcusp = f[i] * (y[i] / ycusp - T::one());

    dfcusp / ddx12 * ycusp * ycusp * dx
}
