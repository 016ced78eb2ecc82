// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar root finding.
//!
//! The rolling simulation needs zeros of two kinds of objective: a squared
//! distance, which touches zero without changing sign, and a chord
//! difference, which crosses zero near a good guess. [`RootSolver`] handles
//! both: it looks for a sign change around the guess and refines it with
//! [`solve_itp`], and falls back to a Newton iteration otherwise.

use tracing::trace;

use crate::RootError;

/// Relative step for the central-difference derivative in the Newton fallback.
const NEWTON_STEP: f64 = 1e-7;

/// Smallest ITP epsilon relative to the bracket width; keeps the iteration
/// count within the `u64` shift in [`solve_itp`].
const ITP_EPSILON_FLOOR: f64 = 1.0 / (1u64 << 60) as f64;

/// Something that can locate a zero of a scalar function near a guess.
pub trait RootFinder {
    /// Find `x` near `guess` with `f(x) == 0` to within the finder's tolerance.
    ///
    /// # Errors
    ///
    /// Returns a [`RootError`] when no zero can be located near `guess`.
    fn find_root<F: FnMut(f64) -> f64>(&self, f: F, guess: f64) -> Result<f64, RootError>;
}

/// A guess-seeded root finder with explicit tolerances.
///
/// The defaults suit objectives whose natural scale is around one, such as
/// squared distances between curves of moderate size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RootSolver {
    /// Absolute tolerance on the returned abscissa.
    pub tolerance: f64,
    /// Residual `|f(x)|` at or below which `x` is accepted outright.
    pub residual: f64,
    /// Offset of the first probes either side of the guess.
    pub initial_step: f64,
    /// How many times the probe offset is doubled while bracketing.
    pub max_expansions: usize,
    /// Iteration cap for the Newton fallback.
    pub max_iterations: usize,
}

impl Default for RootSolver {
    fn default() -> Self {
        RootSolver {
            tolerance: 1e-12,
            residual: 1e-24,
            initial_step: 1e-7,
            max_expansions: 40,
            max_iterations: 100,
        }
    }
}

impl RootSolver {
    /// A solver with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute tolerance on the result.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        RootSolver { tolerance, ..self }
    }

    /// Set the residual accepted without further refinement.
    #[must_use]
    pub fn with_residual(self, residual: f64) -> Self {
        RootSolver { residual, ..self }
    }

    /// Set the Newton iteration cap.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        RootSolver {
            max_iterations,
            ..self
        }
    }

    /// Probe outwards from `guess` for the nearest sign change.
    ///
    /// Each side remembers its last probe, so the returned bracket spans a
    /// single doubling step.
    fn bracket(&self, f: &mut impl FnMut(f64) -> f64, guess: f64, y0: f64) -> Option<Bracket> {
        let mut h = self.initial_step;
        let mut right = (guess, y0);
        let mut left = (guess, y0);
        for _ in 0..=self.max_expansions {
            let x = guess + h;
            let y = f(x);
            if y.is_finite() {
                if changes_sign(y0, y) {
                    return Some(Bracket::new(right, (x, y)));
                }
                right = (x, y);
            }
            let x = guess - h;
            let y = f(x);
            if y.is_finite() {
                if changes_sign(y0, y) {
                    return Some(Bracket::new((x, y), left));
                }
                left = (x, y);
            }
            h *= 2.0;
        }
        None
    }

    fn refine(&self, f: &mut impl FnMut(f64) -> f64, bracket: Bracket) -> f64 {
        let Bracket { a, b, ya, yb } = bracket;
        if ya == 0.0 {
            return a;
        }
        if yb == 0.0 {
            return b;
        }
        let epsilon = self.tolerance.max((b - a) * ITP_EPSILON_FLOOR);
        let k1 = 0.2 / (b - a);
        if ya < 0.0 {
            solve_itp(f, a, b, epsilon, 1, k1, ya, yb)
        } else {
            solve_itp(|x| -f(x), a, b, epsilon, 1, k1, -ya, -yb)
        }
    }

    /// Newton iteration with a central-difference derivative.
    ///
    /// Converges (linearly) on even-multiplicity roots, which have no
    /// sign change to bracket.
    fn newton(&self, f: &mut impl FnMut(f64) -> f64, guess: f64, y0: f64) -> Result<f64, RootError> {
        let mut x = guess;
        let mut y = y0;
        for i in 0..self.max_iterations {
            let h = NEWTON_STEP * x.abs().max(1.0);
            let dy = (f(x + h) - f(x - h)) / (2.0 * h);
            let dx = y / dy;
            if !dx.is_finite() {
                return Err(RootError::NonFinite { x });
            }
            x -= dx;
            y = f(x);
            if !y.is_finite() {
                return Err(RootError::NonFinite { x });
            }
            if y.abs() <= self.residual || dx.abs() <= self.tolerance * x.abs().max(1.0) {
                trace!(x, residual = y, iterations = i + 1, "newton converged");
                return Ok(x);
            }
        }
        Err(RootError::NoConvergence {
            guess,
            iterations: self.max_iterations,
        })
    }
}

impl RootFinder for RootSolver {
    fn find_root<F: FnMut(f64) -> f64>(&self, mut f: F, guess: f64) -> Result<f64, RootError> {
        let y0 = f(guess);
        if !(guess.is_finite() && y0.is_finite()) {
            return Err(RootError::NonFinite { x: guess });
        }
        if y0.abs() <= self.residual {
            return Ok(guess);
        }
        if let Some(bracket) = self.bracket(&mut f, guess, y0) {
            return Ok(self.refine(&mut f, bracket));
        }
        trace!(guess, y0, "no sign change near guess, trying newton");
        self.newton(&mut f, guess, y0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Bracket {
    a: f64,
    b: f64,
    ya: f64,
    yb: f64,
}

impl Bracket {
    fn new((a, ya): (f64, f64), (b, yb): (f64, f64)) -> Self {
        Bracket { a, b, ya, yb }
    }
}

/// `y0` is known to be non-zero.
fn changes_sign(y0: f64, y: f64) -> bool {
    y == 0.0 || (y < 0.0) != (y0 < 0.0)
}

/// Solve an arbitrary function for a zero-crossing.
///
/// This uses the [ITP method], as described in the paper
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality].
///
/// The values of `ya` and `yb` are given as arguments rather than
/// computed from `f`, as the values may already be known.
///
/// It is assumed that `ya < 0.0` and `yb > 0.0`, otherwise unexpected
/// results may occur.
///
/// The value of `epsilon` must be larger than 2^-63 times `b - a`,
/// otherwise integer overflow may occur. The `a` and `b` parameters
/// represent the lower and upper bounds of the bracket searched for a
/// solution.
///
/// This implementation hardwires the k2 tuning parameter to 2. With `n0`
/// at 0 the iteration count never exceeds plain bisection; a value of 1
/// gives the secant component more of a chance on smooth functions.
/// A `k1` of `0.2 / (b - a)` matches the paper.
///
/// When the function is monotonic, the returned result is guaranteed to
/// be within `epsilon` of the zero crossing.
///
/// [ITP method]: https://en.wikipedia.org/wiki/ITP_Method
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality]: https://dl.acm.org/doi/10.1145/3423597
#[allow(clippy::too_many_arguments, reason = "the ITP parameters are all independent")]
pub fn solve_itp(
    mut f: impl FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    n0: usize,
    k1: f64,
    mut ya: f64,
    mut yb: f64,
) -> f64 {
    let n1_2 = (((b - a) / epsilon).log2().ceil() - 1.0).max(0.0) as usize;
    let nmax = n0 + n1_2;
    let mut scaled_epsilon = epsilon * (1u64 << nmax) as f64;
    while b - a > 2.0 * epsilon {
        let x1_2 = 0.5 * (a + b);
        let r = scaled_epsilon - 0.5 * (b - a);
        let xf = (yb * a - ya * b) / (yb - ya);
        let sigma = x1_2 - xf;
        // This has k2 = 2 hardwired for efficiency.
        let delta = k1 * (b - a).powi(2);
        let xt = if delta <= (x1_2 - xf).abs() {
            xf + delta.copysign(sigma)
        } else {
            x1_2
        };
        let xitp = if (xt - x1_2).abs() <= r {
            xt
        } else {
            x1_2 - r.copysign(sigma)
        };
        let yitp = f(xitp);
        if yitp > 0.0 {
            b = xitp;
            yb = yitp;
        } else if yitp < 0.0 {
            a = xitp;
            ya = yitp;
        } else {
            return xitp;
        }
        scaled_epsilon *= 0.5;
    }
    0.5 * (a + b)
}
