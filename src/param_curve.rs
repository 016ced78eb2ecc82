// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::Point;

/// A curve parametrized by a scalar.
///
/// Unlike segment types, the parameter is not restricted to `[0, 1]`: a
/// rolling simulation walks the parameter across the whole real line, so
/// implementations should be defined (and preferably smooth) everywhere.
pub trait ParamCurve {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> Point;
}

impl<C: ParamCurve + ?Sized> ParamCurve for &C {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        (**self).eval(t)
    }
}

impl<C: ParamCurve + ?Sized> ParamCurve for Box<C> {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        (**self).eval(t)
    }
}

impl<C: ParamCurve + ?Sized> ParamCurve for Rc<C> {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        (**self).eval(t)
    }
}

impl<C: ParamCurve + ?Sized> ParamCurve for Arc<C> {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        (**self).eval(t)
    }
}

/// A curve given by a pair of coordinate functions.
///
/// ```
/// use roulette::{FnCurve, ParamCurve, Point};
///
/// let parabola = FnCurve::new(|t| t, |t| t * t);
/// assert_eq!(parabola.eval(2.0), Point::new(2.0, 4.0));
/// ```
#[derive(Clone, Copy)]
pub struct FnCurve<X, Y> {
    x: X,
    y: Y,
}

impl<X, Y> FnCurve<X, Y>
where
    X: Fn(f64) -> f64,
    Y: Fn(f64) -> f64,
{
    /// Create a curve from its `x(t)` and `y(t)` functions.
    pub fn new(x: X, y: Y) -> Self {
        FnCurve { x, y }
    }
}

impl<X, Y> ParamCurve for FnCurve<X, Y>
where
    X: Fn(f64) -> f64,
    Y: Fn(f64) -> f64,
{
    #[inline]
    fn eval(&self, t: f64) -> Point {
        Point::new((self.x)(t), (self.y)(t))
    }
}

impl<X, Y> fmt::Debug for FnCurve<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCurve").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(c: impl ParamCurve) -> Point {
        c.eval(0.5)
    }

    #[test]
    fn fn_curve_eval() {
        let c = FnCurve::new(f64::cos, f64::sin);
        let p = c.eval(0.0);
        assert_eq!(p, Point::new(1.0, 0.0));
    }

    #[test]
    fn smart_pointers_forward() {
        let c = FnCurve::new(|t| 2.0 * t, |t| -t);
        let expected = Point::new(1.0, -0.5);
        assert_eq!(sample(&c), expected);
        assert_eq!(sample(Box::new(c)), expected);
        assert_eq!(sample(Rc::new(c)), expected);
        let dynamic: Arc<dyn ParamCurve + Send + Sync> = Arc::new(c);
        assert_eq!(sample(dynamic), expected);
    }
}
