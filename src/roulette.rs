// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One curve rolling without slipping along another.

use tracing::{debug, trace};

use crate::common::{RootFinder, RootSolver};
use crate::{angle, apply_rotation, Affine, ParamCurve, Point, RouletteError, RouletteResult};

/// The outcome of a successful [`Roulette::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// The new contact parameter on the rolling curve.
    pub t1: f64,
    /// The new contact parameter on the base curve.
    pub t2: f64,
    /// The rotation applied to the attached points, in radians.
    pub angle: f64,
    /// The center of that rotation: the contact point before the step.
    pub center: Point,
}

/// A rolling curve advancing along a base curve by discrete steps.
///
/// The rolling curve is defined in its own body frame and placed in the
/// plane by [`pose`](Self::pose); every step rotates that placement about
/// the current contact point, together with the attached points handed to
/// [`step`](Self::step). A point rigidly attached to the rolling curve
/// thereby traces its roulette.
///
/// Each step advances the rolling parameter by `step_size` and finds the
/// matching base parameter by equating the chords, measured from the old
/// contact point, on both curves. That is a first-order stand-in for equal
/// arc length, so smaller steps follow the true roulette more closely.
///
/// ```
/// use roulette::{Circle, Line, Point, Roulette};
/// use std::f64::consts::FRAC_PI_2;
///
/// // A unit wheel standing on the x axis, parametrized from its bottom.
/// let wheel = Circle::new((0.0, 1.0), 1.0).with_phase(-FRAC_PI_2);
/// let ground = Line::new((0.0, 0.0), (1.0, 0.0));
/// let mut roulette = Roulette::new(wheel, ground, 0.0, 0.01)?;
///
/// let mut attached = [Point::new(0.0, 1.0)];
/// roulette.roll(&mut attached, 100)?;
/// assert!((roulette.t2() - 1.0).abs() < 1e-3);
/// assert!(roulette.contact_gap() < 1e-9);
/// # Ok::<(), roulette::RouletteError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Roulette<R, B, S = RootSolver> {
    rolling: R,
    base: B,
    solver: S,
    start: f64,
    step_size: f64,
    steps: u64,
    t1: f64,
    t2: f64,
    pose: Affine,
}

impl<R: ParamCurve, B: ParamCurve> Roulette<R, B> {
    /// Put `rolling` in contact with `base` at rolling parameter `start`.
    ///
    /// The base parameter of the contact is searched for near zero.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::Initialization`] if the curves do not touch
    /// there.
    pub fn new(rolling: R, base: B, start: f64, step_size: f64) -> RouletteResult<Self> {
        Self::with_solver(rolling, base, start, step_size, RootSolver::default())
    }
}

impl<R: ParamCurve, B: ParamCurve, S: RootFinder> Roulette<R, B, S> {
    /// Like [`Roulette::new`], with an explicit root finder.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::Initialization`] if the curves do not touch
    /// near base parameter zero.
    pub fn with_solver(
        rolling: R,
        base: B,
        start: f64,
        step_size: f64,
        solver: S,
    ) -> RouletteResult<Self> {
        let anchor = rolling.eval(start);
        let t2 = solver
            .find_root(contact_objective(anchor, &base), 0.0)
            .map_err(|source| RouletteError::Initialization { start, source })?;
        debug!(start, t2, gap = anchor.distance(base.eval(t2)), "initial contact");
        Ok(Roulette {
            rolling,
            base,
            solver,
            start,
            step_size,
            steps: 0,
            t1: start,
            t2,
            pose: Affine::IDENTITY,
        })
    }

    /// Roll one step, rotating `points` along with the rolling curve.
    ///
    /// The step is atomic: on error, the contact parameters, the pose and
    /// every point are left exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::StepRoot`] if no matching contact is found on
    /// the base curve, or [`RouletteError::DegenerateGeometry`] if the
    /// contact points coincide so the rotation is undefined.
    pub fn step(&mut self, points: &mut [Point]) -> RouletteResult<Step> {
        let (t1, t2) = (self.t1, self.t2);
        let t1_new = self.param_after(self.steps + 1);
        let center = self.rolling_point(t1);
        let next = self.rolling_point(t1_new);

        let objective = chord_objective(center, center.distance_squared(next), &self.base);
        let t2_new = self
            .solver
            .find_root(objective, t2 + self.step_size)
            .map_err(|source| RouletteError::StepRoot { t1, t2, source })?;
        let target = self.base.eval(t2_new);
        let alpha = -angle(next, center, target).ok_or(RouletteError::DegenerateGeometry { t1, t2 })?;

        apply_rotation(points, alpha, center);
        self.pose = self.pose.then_rotate_about(alpha, center);
        self.steps += 1;
        self.t1 = t1_new;
        self.t2 = t2_new;
        trace!(t1 = t1_new, t2 = t2_new, alpha, "rolled");
        Ok(Step {
            t1: t1_new,
            t2: t2_new,
            angle: alpha,
            center,
        })
    }

    /// Roll `n` steps, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed step; the steps before it stay
    /// committed.
    pub fn roll(&mut self, points: &mut [Point], n: usize) -> RouletteResult<()> {
        for _ in 0..n {
            self.step(points)?;
        }
        Ok(())
    }

    /// The placed rolling curve at parameter `t`.
    #[inline]
    pub fn rolling_point(&self, t: f64) -> Point {
        self.pose * self.rolling.eval(t)
    }

    /// The current contact point, on the base curve.
    #[inline]
    pub fn contact(&self) -> Point {
        self.base.eval(self.t2)
    }

    /// Distance between the two curves' contact points.
    ///
    /// Zero up to the root finder's tolerance.
    pub fn contact_gap(&self) -> f64 {
        self.rolling_point(self.t1).distance(self.contact())
    }

    fn param_after(&self, steps: u64) -> f64 {
        self.start + steps as f64 * self.step_size
    }
}

impl<R, B, S> Roulette<R, B, S> {
    /// The contact parameter on the rolling curve.
    #[inline]
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// The contact parameter on the base curve.
    #[inline]
    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// The starting parameter on the rolling curve.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// The parameter advance per step on the rolling curve.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// The number of successful steps so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The placement of the rolling curve's body frame.
    #[inline]
    pub fn pose(&self) -> Affine {
        self.pose
    }

    /// The rolling curve, in its body frame.
    #[inline]
    pub fn rolling(&self) -> &R {
        &self.rolling
    }

    /// The base curve.
    #[inline]
    pub fn base(&self) -> &B {
        &self.base
    }
}

/// Squared distance from `anchor` to the base curve; zero at a contact.
fn contact_objective<B: ParamCurve>(anchor: Point, base: &B) -> impl Fn(f64) -> f64 + '_ {
    move |t| anchor.distance_squared(base.eval(t))
}

/// Squared rolling chord minus squared base chord, both from `anchor`.
///
/// Zero where the base curve is as far from the old contact as the new
/// rolling contact is.
fn chord_objective<B: ParamCurve>(anchor: Point, chord_sq: f64, base: &B) -> impl Fn(f64) -> f64 + '_ {
    move |t| chord_sq - anchor.distance_squared(base.eval(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Circle, Ellipse, FnCurve, Line};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, TAU};

    const CONTACT_EPSILON: f64 = 1e-9;

    fn wheel(radius: f64) -> Circle {
        Circle::new((0.0, radius), radius).with_phase(-FRAC_PI_2)
    }

    fn ground() -> Line {
        Line::new((0.0, 0.0), (1.0, 0.0))
    }

    fn bits(points: &[Point]) -> Vec<(u64, u64)> {
        points.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
    }

    #[test]
    fn initial_contact_is_found() {
        let r = Roulette::new(wheel(1.0), ground(), 0.0, 0.1).unwrap();
        assert_eq!(r.t1(), 0.0);
        assert!(r.t2().abs() < 1e-12);
        assert!(r.contact_gap() < CONTACT_EPSILON);
        assert_eq!(r.steps(), 0);
        assert_eq!(r.pose(), Affine::IDENTITY);
    }

    #[test]
    fn initial_contact_away_from_zero() {
        // The wheel touches the ground at x = 0.5, so t2 must leave the guess.
        let shifted = Circle::new((0.5, 1.0), 1.0).with_phase(-FRAC_PI_2);
        let r = Roulette::new(shifted, ground(), 0.0, 0.1).unwrap();
        assert_abs_diff_eq!(r.t2(), 0.5, epsilon = 1e-9);
        assert!(r.contact_gap() < 1e-9);
    }

    #[test]
    fn initialization_fails_without_contact() {
        let floating = Circle::new((0.0, 1.5), 1.0).with_phase(-FRAC_PI_2);
        let err = Roulette::new(floating, ground(), 0.0, 0.1).unwrap_err();
        assert!(matches!(err, RouletteError::Initialization { start, .. } if start == 0.0));
    }

    #[test]
    fn circle_on_line_first_step() {
        let mut r = Roulette::new(wheel(1.0), ground(), 0.0, 0.1).unwrap();
        let mut points = [Point::new(0.0, 2.0), Point::new(0.0, 1.0)];
        let step = r.step(&mut points).unwrap();

        // The contact advances by the chord, which is the step to first order.
        assert_abs_diff_eq!(r.t2(), 0.1, epsilon = 1e-3);
        assert_abs_diff_eq!(r.t2(), 2.0 * 0.05f64.sin(), epsilon = 1e-11);
        assert!(step.center.distance(Point::ORIGIN) < 1e-15);
        // Rolling to +x turns the wheel clockwise.
        assert!(step.angle < 0.0);

        // Top of the wheel versus the cycloid at the same turning angle.
        let th = -step.angle;
        let cycloid = Point::new(th + th.sin(), 1.0 + th.cos());
        assert!(points[0].distance(cycloid) < 2e-3, "{:?} vs {cycloid:?}", points[0]);
        assert!(r.contact_gap() < CONTACT_EPSILON);
    }

    #[test]
    fn circle_on_line_traces_cycloid() {
        let radius = 1.0;
        let step_size = 0.05;
        let mut r = Roulette::new(wheel(radius), ground(), 0.0, step_size).unwrap();
        let mut points = [Point::new(0.0, 2.0 * radius), Point::new(0.0, radius)];
        let mut turned = 0.0;
        for _ in 0..120 {
            turned -= r.step(&mut points).unwrap().angle;
            // The center stays at wheel height up to the chord sag.
            let center = points[1];
            assert!((center.y - radius).abs() < 1e-3);
            // The attached top point stays on the cycloid for the angle turned.
            let cycloid = Point::new(
                radius * (turned + turned.sin()),
                radius * (1.0 + turned.cos()),
            );
            assert!(points[0].distance(cycloid) < 2e-3);
            assert!(r.contact_gap() < CONTACT_EPSILON);
        }
        // Turning matches the distance travelled.
        assert_abs_diff_eq!(turned * radius, r.t2(), epsilon = step_size);
    }

    #[test]
    fn parameter_advance_is_exact() {
        let start = 0.3;
        let step_size = 0.07;
        let rolling = Circle::new((0.0, 2.0), 2.0).with_phase(-FRAC_PI_2 - start / 2.0);
        let mut r = Roulette::new(rolling, ground(), start, step_size).unwrap();
        let mut points: [Point; 0] = [];
        for n in 1..=50u32 {
            r.step(&mut points).unwrap();
            assert_eq!(r.t1(), start + f64::from(n) * step_size);
        }
        assert_eq!(r.steps(), 50);
    }

    #[test]
    fn chord_lengths_match() {
        let mut r = Roulette::new(wheel(0.7), ground(), 0.0, 0.2).unwrap();
        let mut points: [Point; 0] = [];
        for _ in 0..20 {
            let old = r.rolling_point(r.t1());
            let rolling_chord = old.distance(r.rolling_point(r.t1() + r.step_size()));
            r.step(&mut points).unwrap();
            let base_chord = old.distance(r.contact());
            assert_abs_diff_eq!(rolling_chord, base_chord, epsilon = 1e-9);
        }
    }

    #[test]
    fn equal_circles_close_after_one_revolution() {
        let n = 60;
        let step_size = TAU / f64::from(n);
        let base = Circle::new((0.0, 0.0), 1.0);
        let rolling = Circle::new((2.0, 0.0), 1.0)
            .with_phase(std::f64::consts::PI)
            .reversed();
        let mut r = Roulette::new(rolling, base, 0.0, step_size).unwrap();
        let start_t2 = r.t2();
        let mut points = [Point::new(2.0, 0.0)];
        for _ in 0..n {
            r.step(&mut points).unwrap();
            assert!(r.contact_gap() < CONTACT_EPSILON);
        }
        let turns = (r.t2() - start_t2) / TAU;
        assert_abs_diff_eq!(turns, 1.0, epsilon = 1e-9);
        // The center goes round with the chords, half a step behind: the
        // first step only turns by half a chord angle.
        let center = points[0].to_vec2();
        assert_abs_diff_eq!(center.hypot(), 2.0 * (step_size / 2.0).cos(), epsilon = 1e-8);
        assert_abs_diff_eq!(center.atan2(), -step_size / 2.0, epsilon = 1e-8);
    }

    #[test]
    fn negative_step_rolls_backwards() {
        let mut r = Roulette::new(wheel(1.0), ground(), 0.0, -0.1).unwrap();
        let mut points = [Point::new(0.0, 1.0)];
        r.roll(&mut points, 10).unwrap();
        assert!(r.t2() < -0.9);
        assert!(points[0].x < -0.9);
        assert!(r.contact_gap() < CONTACT_EPSILON);
    }

    #[test]
    fn ellipse_rolls_on_line() {
        let ellipse = Ellipse::new((0.0, 1.0), (2.0, 1.0), 0.0);
        // Parameter -π/2 is the bottom of the ellipse.
        let mut r = Roulette::new(ellipse, ground(), -FRAC_PI_2, 0.02).unwrap();
        let mut points = [Point::new(0.0, 1.0)];
        for _ in 0..150 {
            r.step(&mut points).unwrap();
            assert!(r.contact_gap() < CONTACT_EPSILON);
            // The contact stays on the ground and the body above it.
            assert!(r.contact().y.abs() < 1e-12);
            assert!(points[0].y > 0.9);
        }
    }

    #[test]
    fn contact_holds_for_random_wheels() {
        let mut rng = StdRng::seed_from_u64(0x7011);
        for _ in 0..20 {
            let radius = rng.random_range(0.5..3.0);
            let step_size = rng.random_range(0.01..0.2) * radius;
            let start = rng.random_range(-1.0..1.0);
            let rolling = Circle::new((0.0, radius), radius).with_phase(-FRAC_PI_2 - start / radius);
            let mut r = Roulette::new(rolling, ground(), start, step_size).unwrap();
            assert!(r.contact_gap() < CONTACT_EPSILON);
            let mut points = [Point::new(0.0, radius)];
            r.roll(&mut points, 25).unwrap();
            assert!(r.contact_gap() < CONTACT_EPSILON);
        }
    }

    #[test]
    fn zero_step_is_degenerate() {
        let mut r = Roulette::new(wheel(1.0), ground(), 0.0, 0.0).unwrap();
        let mut points = [Point::new(0.0, 2.0)];
        let err = r.step(&mut points).unwrap_err();
        assert!(matches!(err, RouletteError::DegenerateGeometry { .. }));
        assert_eq!(r.steps(), 0);
        assert_eq!(points, [Point::new(0.0, 2.0)]);
    }

    #[test]
    fn failed_step_changes_nothing() {
        // A wheel far larger than the base circle: no chord on the base is
        // long enough to match.
        let base = Circle::new((0.0, -0.01), 0.01).with_phase(FRAC_PI_2);
        let mut r = Roulette::new(wheel(1.0), base, 0.0, 0.5).unwrap();
        let mut points = [Point::new(0.0, 2.0), Point::new(0.3, -0.7)];
        let before = bits(&points);
        let (t1, t2, pose) = (r.t1(), r.t2(), r.pose());

        let err = r.step(&mut points).unwrap_err();
        assert!(matches!(err, RouletteError::StepRoot { .. }), "{err}");
        assert_eq!(bits(&points), before);
        assert_eq!(r.t1().to_bits(), t1.to_bits());
        assert_eq!(r.t2().to_bits(), t2.to_bits());
        assert_eq!(r.pose(), pose);
        assert_eq!(r.steps(), 0);
    }

    #[test]
    fn rolls_inside_a_parabola() {
        // The valley is flatter than the wheel at its vertex.
        let base = FnCurve::new(|t| t, |t| t * t);
        let mut r = Roulette::new(wheel(0.25), base, 0.0, 0.05).unwrap();
        let mut points: [Point; 0] = [];
        r.roll(&mut points, 10).unwrap();
        assert_eq!(r.steps(), 10);
        assert!(r.contact_gap() < CONTACT_EPSILON);
    }

    #[test]
    fn curve_references_can_be_shared() {
        let w = wheel(1.0);
        let g = ground();
        let mut a = Roulette::new(&w, &g, 0.0, 0.1).unwrap();
        let mut b = Roulette::new(&w, &g, 0.0, -0.1).unwrap();
        let mut points: [Point; 0] = [];
        a.step(&mut points).unwrap();
        b.step(&mut points).unwrap();
        assert_abs_diff_eq!(a.t2(), -b.t2(), epsilon = 1e-10);
    }
}
