// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The signed angle between two rays sharing a vertex.

use crate::Point;

/// The signed angle at `vertex` between the rays towards `a` and `b`.
///
/// The result is the anti-clockwise rotation (Y-up) about `vertex` that
/// carries the ray towards `b` onto the ray towards `a`, in radians within
/// `(-π, π]`. Negating it gives the rotation that carries `a`'s ray onto
/// `b`'s, which is what [`Affine::rotate_about`](crate::Affine::rotate_about)
/// expects when moving `a` towards `b`.
///
/// Returns `None` if either ray has zero length or an input is not finite,
/// since the angle is undefined there.
///
/// ```
/// use roulette::{angle, Point};
///
/// let vertex = Point::ORIGIN;
/// let a = Point::new(0.0, 1.0);
/// let b = Point::new(1.0, 0.0);
/// let th = angle(a, vertex, b).unwrap();
/// assert!((th - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn angle(a: Point, vertex: Point, b: Point) -> Option<f64> {
    let va = a - vertex;
    let vb = b - vertex;
    if !(va.is_finite() && vb.is_finite()) {
        return None;
    }
    if va.hypot2() == 0.0 || vb.hypot2() == 0.0 {
        return None;
    }
    let th = vb.cross(va).atan2(vb.dot(va));
    // atan2 reports -π for a negative-zero cross product.
    Some(if th == -std::f64::consts::PI {
        std::f64::consts::PI
    } else {
        th
    })
}

#[cfg(test)]
mod tests {
    use super::angle;
    use crate::{Affine, Point};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn quarter_turns() {
        let o = Point::ORIGIN;
        let x = Point::new(1.0, 0.0);
        let y = Point::new(0.0, 1.0);
        assert!((angle(y, o, x).unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert!((angle(x, o, y).unwrap() + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn half_turn_is_positive() {
        let o = Point::new(3.0, 3.0);
        let th = angle(Point::new(4.0, 3.0), o, Point::new(2.0, 3.0)).unwrap();
        assert_eq!(th, PI);
    }

    #[test]
    fn independent_of_ray_length() {
        let o = Point::new(-1.0, 2.0);
        let a = Point::new(-1.0 + 10.0 * FRAC_PI_4.cos(), 2.0 + 10.0 * FRAC_PI_4.sin());
        let b = Point::new(-0.5, 2.0);
        assert!((angle(a, o, b).unwrap() - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn negated_angle_rotates_a_onto_b() {
        let vertex = Point::new(0.5, -0.25);
        let a = Point::new(2.0, 1.0);
        let b = Point::new(-0.3, 1.4);
        let th = angle(a, vertex, b).unwrap();
        let moved = Affine::rotate_about(-th, vertex) * a;
        let dir_b = (b - vertex) * (1.0 / (b - vertex).hypot());
        let dir_moved = (moved - vertex) * (1.0 / (moved - vertex).hypot());
        assert!((dir_b - dir_moved).hypot() < 1e-12);
    }

    #[test]
    fn degenerate_rays() {
        let o = Point::new(1.0, 1.0);
        assert_eq!(angle(o, o, Point::new(2.0, 1.0)), None);
        assert_eq!(angle(Point::new(2.0, 1.0), o, o), None);
        assert_eq!(angle(Point::new(f64::NAN, 0.0), o, Point::ORIGIN), None);
    }
}
