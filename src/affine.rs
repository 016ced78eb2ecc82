// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rigid placements and the one-shot rotation of attached points.

use std::ops::Mul;

use crate::{Point, Vec2};

/// A 2D affine transform.
///
/// A rolling simulation only ever composes rotations about contact points,
/// so in practice every `Affine` it produces is a rigid motion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    #[inline]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// Rotation by `th` radians about the origin, anti-clockwise in Y-up
    /// coordinates.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        Affine::rotate_about(th, Point::ORIGIN)
    }

    /// Rotation by `th` radians about `center`.
    ///
    /// `center` is the only fixed point, so `p` maps to
    /// `center + R (p - center)`.
    #[inline]
    pub fn rotate_about(th: f64, center: impl Into<Point>) -> Affine {
        let Point { x, y } = center.into();
        let (s, c) = th.sin_cos();
        Affine([c, s, -s, c, x - c * x + s * y, y - s * x - c * y])
    }

    /// Pure translation by `v`.
    #[inline]
    pub fn translate(v: impl Into<Vec2>) -> Affine {
        let v = v.into();
        Affine([1.0, 0.0, 0.0, 1.0, v.x, v.y])
    }

    /// `self` followed by a rotation of `th` about `center`.
    #[inline]
    #[must_use]
    pub fn then_rotate_about(self, th: f64, center: impl Into<Point>) -> Self {
        Affine::rotate_about(th, center) * self
    }

    /// The coefficients, in the order taken by [`Affine::new`].
    #[inline]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// The determinant of the linear part; one for rigid motions.
    #[inline]
    pub fn determinant(self) -> f64 {
        let [a, b, c, d, _, _] = self.0;
        a * d - b * c
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

/// Composition: `(lhs * rhs) * p == lhs * (rhs * p)`.
impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Affine([
            a * a2 + c * b2,
            b * a2 + d * b2,
            a * c2 + c * d2,
            b * c2 + d * d2,
            a * e2 + c * f2 + e,
            b * e2 + d * f2 + f,
        ])
    }
}

/// Rotate every point in `points` by `angle` radians about `center`, in place.
///
/// This is a one-shot rotation: nothing about the transform is kept, so the
/// accumulated displacement lives only in the points themselves.
pub fn apply_rotation(points: &mut [Point], angle: f64, center: Point) {
    let rotation = Affine::rotate_about(angle, center);
    for p in points.iter_mut() {
        *p = rotation * *p;
    }
}
