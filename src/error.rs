// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for root finding and rolling.

use thiserror::Error;

/// Errors from [`RootFinder::find_root`](crate::common::RootFinder::find_root).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum RootError {
    /// No sign change was found around the guess and the Newton fallback ran
    /// out of iterations.
    #[error("no root found near {guess} after {iterations} iterations")]
    NoConvergence {
        /// The initial guess.
        guess: f64,
        /// Newton iterations performed.
        iterations: usize,
    },

    /// The objective or the iteration produced a non-finite value.
    #[error("objective is not finite near {x}")]
    NonFinite {
        /// The abscissa where the search broke down.
        x: f64,
    },
}

/// Errors raised while setting up or advancing a rolling simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouletteError {
    /// The curves do not touch near base parameter zero.
    #[error("no initial contact for rolling parameter {start}")]
    Initialization {
        /// The starting parameter on the rolling curve.
        start: f64,
        /// Why the contact search failed.
        #[source]
        source: RootError,
    },

    /// The chord-matching search failed; nothing was changed.
    #[error("no matching contact on the base curve at t1 = {t1}, t2 = {t2}")]
    StepRoot {
        /// Rolling parameter before the failed step.
        t1: f64,
        /// Base parameter before the failed step.
        t2: f64,
        /// Why the search failed.
        #[source]
        source: RootError,
    },

    /// The rotation angle is undefined because contact points coincide.
    #[error("degenerate contact geometry at t1 = {t1}, t2 = {t2}")]
    DegenerateGeometry {
        /// Rolling parameter before the failed step.
        t1: f64,
        /// Base parameter before the failed step.
        t2: f64,
    },

    /// The scheduler's worker thread could not be started.
    #[error("failed to start the step scheduler")]
    Schedule(#[from] std::io::Error),
}

/// Result type for rolling operations.
pub type RouletteResult<T> = Result<T, RouletteError>;
