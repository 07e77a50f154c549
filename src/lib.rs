#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which repeatedly squaring `z` and adding `c`, starting from zero,
//! never runs off to infinity.  Once `|z|` passes 2 the orbit is sure
//! to diverge, so the number of iterations it takes to get there (the
//! "escape time") measures how far outside the set a point lies.
//! Points that are still within the radius after the iteration budget
//! is spent are counted as inside.
//!
//! This crate is the numeric core of that picture: an evaluator that
//! computes escape times (and, for narration, the orbit itself), a
//! precomputed color ramp that turns escape times into colors, and a
//! renderer that sweeps a rectangular grid of samples, optionally over
//! several threads.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;

#[cfg(test)]
extern crate rand;

pub mod color;
pub mod error;
pub mod escape;
pub mod gradient;
pub mod grid;
pub mod parse;
pub mod render;

pub use color::{Color, Palette};
pub use error::{Error, Result};
pub use escape::{escape_time, trace, Orbit, TraceStep};
pub use gradient::ColorRamp;
pub use grid::GridSpec;
pub use render::Renderer;
