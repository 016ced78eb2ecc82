// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a [`Roulette`] on a timer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::common::{RootFinder, RootSolver};
use crate::{Interval, ParamCurve, Point, Roulette, RouletteResult, Step};

/// A point list shared between an [`Animation`] and its owner.
///
/// Lock order: this lock comes before the simulation's. Holding it while
/// calling [`Animation::with_roulette`] is fine; locking it from inside the
/// closure passed there is not.
pub type SharedPoints = Arc<Mutex<Vec<Point>>>;

type Redraw = Box<dyn FnMut() + Send>;

struct Stage<R, B, S> {
    roulette: Roulette<R, B, S>,
    failed: u64,
}

/// A rolling simulation stepped periodically on a worker thread.
///
/// Each tick rolls the simulation one step, rotating the shared points, and
/// then calls the redraw hook. The simulation sits behind a lock, so manual
/// [`step`](Self::step) calls and scheduled ticks never interleave.
///
/// A tick locks the points, then the simulation, and releases both before
/// redrawing, so the hook may lock the points or read the simulation.
///
/// A failed scheduled tick is logged and counted, and leaves everything as
/// it was; the schedule keeps running until [`stop`](Self::stop).
///
/// ```no_run
/// use parking_lot::Mutex;
/// use roulette::{Animation, Circle, Line, Point, Roulette};
/// use std::f64::consts::FRAC_PI_2;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let wheel = Circle::new((0.0, 1.0), 1.0).with_phase(-FRAC_PI_2);
/// let ground = Line::new((0.0, 0.0), (1.0, 0.0));
/// let roulette = Roulette::new(wheel, ground, 0.0, 0.05)?;
/// let points = Arc::new(Mutex::new(vec![Point::new(0.0, 2.0)]));
///
/// let mut animation = Animation::new(roulette, Arc::clone(&points), Duration::from_millis(16))
///     .on_redraw(|| println!("redraw"));
/// animation.start()?;
/// std::thread::sleep(Duration::from_secs(1));
/// animation.stop();
/// println!("{:?}", points.lock());
/// # Ok::<(), roulette::RouletteError>(())
/// ```
pub struct Animation<R, B, S = RootSolver> {
    stage: Arc<Mutex<Stage<R, B, S>>>,
    redraw: Arc<Mutex<Option<Redraw>>>,
    points: SharedPoints,
    period: Duration,
    interval: Option<Interval>,
}

impl<R, B, S> Animation<R, B, S>
where
    R: ParamCurve,
    B: ParamCurve,
    S: RootFinder,
{
    /// Bind a simulation to a shared point list.
    ///
    /// A zero `period` never schedules; the animation then only moves
    /// through [`step`](Self::step).
    pub fn new(roulette: Roulette<R, B, S>, points: SharedPoints, period: Duration) -> Self {
        Animation {
            stage: Arc::new(Mutex::new(Stage { roulette, failed: 0 })),
            redraw: Arc::new(Mutex::new(None)),
            points,
            period,
            interval: None,
        }
    }

    /// Call `redraw` after every successful step.
    #[must_use]
    pub fn on_redraw(self, redraw: impl FnMut() + Send + 'static) -> Self {
        *self.redraw.lock() = Some(Box::new(redraw));
        self
    }

    /// Roll one step now, whether or not the animation is running.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Roulette::step`]; nothing is changed then.
    pub fn step(&self) -> RouletteResult<Step> {
        advance(&self.stage, &self.points, &self.redraw)
    }

    /// Run `f` with the simulation, holding off ticks meanwhile.
    ///
    /// The caller may already hold the [`SharedPoints`] lock, which then
    /// pins the points and the simulation to the same step. `f` must not
    /// lock the points itself.
    pub fn with_roulette<T>(&self, f: impl FnOnce(&Roulette<R, B, S>) -> T) -> T {
        f(&self.stage.lock().roulette)
    }
}

impl<R, B, S> Animation<R, B, S>
where
    R: ParamCurve + Send + 'static,
    B: ParamCurve + Send + 'static,
    S: RootFinder + Send + 'static,
{
    /// Start stepping every period.
    ///
    /// Does nothing if the animation is already running or the period is
    /// zero. A schedule that ended because a tick panicked is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::Schedule`](crate::RouletteError::Schedule)
    /// if the worker thread cannot be started.
    pub fn start(&mut self) -> RouletteResult<&mut Self> {
        if self.is_running() {
            debug!("animation already running");
            return Ok(self);
        }
        if self.period.is_zero() {
            debug!("zero period, not scheduling");
            return Ok(self);
        }
        if let Some(dead) = self.interval.take() {
            dead.cancel();
        }
        let stage = Arc::clone(&self.stage);
        let points = Arc::clone(&self.points);
        let redraw = Arc::clone(&self.redraw);
        let interval = Interval::spawn(self.period, move || {
            if let Err(err) = advance(&stage, &points, &redraw) {
                let (t1, t2) = {
                    let stage = stage.lock();
                    (stage.roulette.t1(), stage.roulette.t2())
                };
                warn!(t1, t2, error = %err, "scheduled step failed");
            }
        })?;
        self.interval = Some(interval);
        info!(period = ?self.period, "animation started");
        Ok(self)
    }
}

impl<R, B, S> Animation<R, B, S> {
    /// Stop stepping; a step in progress completes first.
    ///
    /// Safe to call when not running. Must not be called while holding the
    /// [`SharedPoints`] lock, since the tick in progress may be waiting on it.
    pub fn stop(&mut self) -> &mut Self {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
            info!("animation stopped");
        }
        self
    }

    /// Whether a schedule is active.
    ///
    /// Turns `false` on its own if a tick panicked, for instance in the
    /// redraw hook.
    pub fn is_running(&self) -> bool {
        self.interval.as_ref().is_some_and(Interval::is_active)
    }

    /// The time between scheduled steps.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The shared point list.
    pub fn points(&self) -> &SharedPoints {
        &self.points
    }

    /// How many steps have failed so far, scheduled or manual.
    pub fn failed_steps(&self) -> u64 {
        self.stage.lock().failed
    }
}

impl<R, B, S> fmt::Debug for Animation<R, B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// One tick: points lock, then simulation lock, both released before the
/// redraw.
fn advance<R, B, S>(
    stage: &Mutex<Stage<R, B, S>>,
    points: &Mutex<Vec<Point>>,
    redraw: &Mutex<Option<Redraw>>,
) -> RouletteResult<Step>
where
    R: ParamCurve,
    B: ParamCurve,
    S: RootFinder,
{
    let result = {
        let mut points = points.lock();
        let mut stage = stage.lock();
        let result = stage.roulette.step(&mut points);
        if result.is_err() {
            stage.failed += 1;
        }
        result
    };
    if result.is_ok() {
        if let Some(redraw) = redraw.lock().as_mut() {
            redraw();
        }
    }
    result
}
