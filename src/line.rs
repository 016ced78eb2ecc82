// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use crate::{ParamCurve, Point, Vec2};

/// An infinite straight line through two points.
///
/// `eval(0.0)` is `p0` and `eval(1.0)` is `p1`; other parameters extrapolate.
/// When `p0` and `p1` are one unit apart the parameter is arc length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The point at `t = 0`.
    pub p0: Point,
    /// The point at `t = 1`.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// A line through `origin`, parametrized by arc length along `direction`.
    ///
    /// `direction` need not be normalized, but must be non-zero.
    #[inline]
    pub fn arclen(origin: impl Into<Point>, direction: Vec2) -> Line {
        let origin = origin.into();
        Line {
            p0: origin,
            p1: origin + direction * direction.hypot().recip(),
        }
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }
}
