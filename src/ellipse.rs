// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implementation of ellipse curve.

use crate::{Affine, ParamCurve, Point, Vec2};

/// An ellipse, parametrized by the eccentric angle.
///
/// `eval(t)` is `center + rotate(rotation) * (radii.x cos t, radii.y sin t)`.
/// Unlike [`Circle`](crate::Circle) this is not an arc-length
/// parametrization, which rolling handles just as well.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The center.
    pub center: Point,
    /// The semi-axes along the (rotated) x and y directions.
    pub radii: Vec2,
    /// The rotation of the x semi-axis, in radians.
    pub rotation: f64,
}

impl Ellipse {
    /// Create a new ellipse with a given center, radii, and rotation.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>, rotation: f64) -> Ellipse {
        Ellipse {
            center: center.into(),
            radii: radii.into(),
            rotation,
        }
    }

    /// The transform mapping the unit circle onto this ellipse.
    #[inline]
    pub fn to_affine(&self) -> Affine {
        let (s, c) = self.rotation.sin_cos();
        Affine::new([
            c * self.radii.x,
            s * self.radii.x,
            -s * self.radii.y,
            c * self.radii.y,
            self.center.x,
            self.center.y,
        ])
    }
}

impl ParamCurve for Ellipse {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.to_affine() * Vec2::from_angle(t).to_point()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ellipse, ParamCurve, Point, Vec2};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn axis_aligned() {
        let e = Ellipse::new((1.0, 2.0), (3.0, 1.0), 0.0);
        assert!(e.eval(0.0).distance(Point::new(4.0, 2.0)) < 1e-12);
        assert!(e.eval(FRAC_PI_2).distance(Point::new(1.0, 3.0)) < 1e-12);
    }

    #[test]
    fn rotated() {
        let e = Ellipse::new(Point::ORIGIN, Vec2::new(2.0, 1.0), FRAC_PI_2);
        assert!(e.eval(0.0).distance(Point::new(0.0, 2.0)) < 1e-12);
        assert!(e.eval(FRAC_PI_2).distance(Point::new(-1.0, 0.0)) < 1e-12);
    }
}
