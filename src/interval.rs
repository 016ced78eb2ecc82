// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A periodic callback on a worker thread.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Calls a closure every `period` until cancelled.
///
/// Ticks run one at a time on a single worker thread, so they never overlap.
/// A tick that overruns the period delays the next one instead of causing a
/// burst of catch-up ticks.
///
/// Cancelling (or dropping) waits for a tick in progress to finish, and no
/// tick starts after [`cancel`](Self::cancel) returns.
///
/// A tick that panics ends the worker; [`is_active`](Self::is_active) then
/// reports `false`.
#[derive(Debug)]
pub struct Interval {
    period: Duration,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Interval {
    /// Start calling `tick` every `period`; the first call is one period
    /// from now.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the worker thread cannot be spawned.
    pub fn spawn<F>(period: Duration, mut tick: F) -> io::Result<Interval>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("roulette-interval".to_owned())
            .spawn(move || {
                let mut next = Instant::now() + period;
                loop {
                    let wait = next.saturating_duration_since(Instant::now());
                    match stopped.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            tick();
                            next = (next + period).max(Instant::now());
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        debug!(?period, "interval started");
        Ok(Interval {
            period,
            stop: Some(stop),
            worker: Some(worker),
        })
    }

    /// The time between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the worker is still ticking.
    pub fn is_active(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }

    /// Stop ticking, waiting for a tick in progress to complete.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the worker's receiver.
        self.stop = None;
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.thread().id() == thread::current().id() {
            // Cancelled from inside a tick: the loop exits once it returns.
            return;
        }
        if worker.join().is_err() {
            warn!("interval worker panicked");
        }
        debug!(period = ?self.period, "interval stopped");
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.shutdown();
    }
}
