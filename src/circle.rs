// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circles walked at unit speed.

use std::f64::consts::PI;

use crate::{ParamCurve, Point, Vec2};

/// A circle, parametrized by arc length.
///
/// `eval(0.0)` is the point at angle `phase` from the center; increasing the
/// parameter walks anti-clockwise (Y-up), or clockwise when `clockwise` is
/// set, covering one unit of distance per unit of parameter.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
    /// The angle of the point at `t = 0`, in radians.
    pub phase: f64,
    /// Walk the circle clockwise as `t` increases.
    pub clockwise: bool,
}

impl Circle {
    /// A new circle from center and radius, starting at angle zero.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius,
            phase: 0.0,
            clockwise: false,
        }
    }

    /// The same circle with the parameter origin moved to angle `phase`.
    #[inline]
    #[must_use]
    pub fn with_phase(self, phase: f64) -> Circle {
        Circle { phase, ..self }
    }

    /// The same circle walked in the opposite direction.
    #[inline]
    #[must_use]
    pub fn reversed(self) -> Circle {
        Circle {
            clockwise: !self.clockwise,
            ..self
        }
    }

    /// The length of the circle.
    #[inline]
    pub fn perimeter(&self) -> f64 {
        (2.0 * PI * self.radius).abs()
    }

    /// The angle from the center of the point at parameter `t`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        let th = t / self.radius;
        if self.clockwise {
            self.phase - th
        } else {
            self.phase + th
        }
    }
}

impl ParamCurve for Circle {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.center + self.radius * Vec2::from_angle(self.angle_at(t))
    }
}
