// Copyright 2024 the Roulette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rolling one plane curve along another, without slipping.
//!
//! A [`Roulette`] keeps a rolling curve in contact with a base curve and
//! advances it in discrete steps. Each step rotates the rolling curve about
//! the current contact point; points attached to it are rotated along and so
//! trace the roulette of the pair (a cycloid for a wheel on a line, an
//! epicycloid for a circle on a circle).
//!
//! Curves are anything implementing [`ParamCurve`]: the built-in [`Line`],
//! [`Circle`] and [`Ellipse`], or a pair of closures in an [`FnCurve`].
//! Contact parameters are found with the root finder in [`common`].
//!
//! # Examples
//!
//! Tracing a cycloid:
//! ```
//! use roulette::{Circle, Line, Point, Roulette};
//! use std::f64::consts::{FRAC_PI_2, TAU};
//!
//! let wheel = Circle::new((0.0, 1.0), 1.0).with_phase(-FRAC_PI_2);
//! let ground = Line::new((0.0, 0.0), (1.0, 0.0));
//! let mut roulette = Roulette::new(wheel, ground, 0.0, TAU / 1000.0)?;
//!
//! // The point on the rim starting at the contact.
//! let mut pen = [Point::new(0.0, 0.0)];
//! let mut trace = vec![pen[0]];
//! for _ in 0..1000 {
//!     roulette.step(&mut pen)?;
//!     trace.push(pen[0]);
//! }
//! // After one revolution, the pen touches the ground again, one
//! // circumference further on.
//! assert!((pen[0].x - TAU).abs() < 1e-2);
//! assert!(pen[0].y.abs() < 1e-2);
//! # Ok::<(), roulette::RouletteError>(())
//! ```
//!
//! Stepping on a timer is provided by [`Animation`].
//!
//! # Features
//!
//! - `serde`: serialization of the geometry types and [`RootSolver`].
//! - `schemars`: JSON schemas for the same.
//! - `mint`: conversions to and from [`mint`](https://docs.rs/mint) types.

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "numeric code reads better with the notation of the formulas"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod affine;
mod angle;
mod animation;
mod circle;
pub mod common;
mod ellipse;
mod error;
mod interval;
mod line;
mod param_curve;
mod point;
mod roulette;
mod vec2;

pub use crate::affine::*;
pub use crate::angle::*;
pub use crate::animation::*;
pub use crate::circle::*;
pub use crate::common::{RootFinder, RootSolver};
pub use crate::ellipse::*;
pub use crate::error::*;
pub use crate::interval::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::roulette::*;
pub use crate::vec2::*;
