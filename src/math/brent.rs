//! Bracketed scalar root finding (Brent's method).
//!
//! Each step tries inverse quadratic interpolation (or the secant step when only
//! two distinct points are known) and falls back to bisection whenever the
//! interpolated step would leave the bracket or shrink it too slowly. The bracket
//! always keeps a sign change, so convergence is guaranteed once one is found.
//!
//! Numerical notes:
//! - A residual of `±inf` at one end is accepted (it still has a sign) but the
//!   interpolation is skipped while it is part of the step, which keeps the
//!   iterate from crawling by `tol` per step.
//! - NaN residuals abort the search.
//! - The loop is capped at `max_iterations`; the caller owns the failure.

use crate::error::{RootFailure, ScalingError, ScalingResult};

/// Stopping rules for one bracketed solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub max_iterations: usize,
    /// Absolute tolerance on the root.
    pub xtol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    pub iterations: usize,
}

/// Find `x` in `[lower, upper]` with `f(x) = 0`.
///
/// `what` names the unknown in error messages.
pub fn brent<F>(
    what: &'static str,
    mut f: F,
    lower: f64,
    upper: f64,
    opts: &SolverOptions,
) -> ScalingResult<Root>
where
    F: FnMut(f64) -> f64,
{
    let fail = |reason| ScalingError::RootNotFound {
        what,
        lower,
        upper,
        reason,
    };

    let mut x_pre = lower;
    let mut x_cur = upper;
    let mut f_pre = f(x_pre);
    let mut f_cur = f(x_cur);

    if f_pre.is_nan() || f_cur.is_nan() {
        return Err(fail(RootFailure::NonFiniteResidual));
    }
    if f_pre == 0.0 {
        return Ok(Root { x: x_pre, residual: 0.0, iterations: 0 });
    }
    if f_cur == 0.0 {
        return Ok(Root { x: x_cur, residual: 0.0, iterations: 0 });
    }
    if f_pre.signum() == f_cur.signum() {
        return Err(fail(RootFailure::NoSignChange));
    }

    let mut x_blk = 0.0;
    let mut f_blk = 0.0;
    let mut s_pre = 0.0;
    let mut s_cur = 0.0;

    for iteration in 1..=opts.max_iterations {
        if f_pre.signum() != f_cur.signum() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_pre = x_cur - x_pre;
            s_cur = s_pre;
        }
        // Keep the best estimate in `x_cur`.
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = 0.5 * (opts.xtol + opts.rtol * x_cur.abs());
        let s_bis = 0.5 * (x_blk - x_cur);
        if f_cur == 0.0 || s_bis.abs() < delta {
            return Ok(Root { x: x_cur, residual: f_cur, iterations: iteration });
        }

        let interpolate = s_pre.abs() > delta
            && f_cur.abs() < f_pre.abs()
            && f_pre.is_finite()
            && f_blk.is_finite();
        if interpolate {
            let s_try = if x_pre == x_blk {
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };
            if s_try.is_finite() && 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else {
            x_cur += delta.copysign(s_bis);
        }

        f_cur = f(x_cur);
        if f_cur.is_nan() {
            return Err(fail(RootFailure::NonFiniteResidual));
        }
    }

    Err(fail(RootFailure::IterationLimit))
}
