// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.
//!
//! A point `c` on the complex plane is tested by repeatedly squaring
//! `z` and adding `c`, starting from `z = 0`.  The first iteration at
//! which `|z|` exceeds 2 is the point's escape time.  Points that never
//! get there within the iteration budget are reported with the budget
//! itself, and are treated as members of the filled-in set.
//!
//! Both the bulk evaluator and the step-by-step trace walk the same
//! [`Orbit`], so what a trace shows is always what the evaluator
//! computed.

use error::{invalid, Result};
use num::Complex;

/// Once the magnitude of `z` is strictly greater than this, the orbit
/// is guaranteed to diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// The number of steps shown when narrating a single point.
pub const DEFAULT_DISPLAY_CAP: usize = 10;

/// The iterates `z_0, z_1, ...` of `z <- z*z + c`, where `z_0` is the
/// value after the first squaring of the origin (so `z_0 == c`).  The
/// iterator never ends; callers decide when to stop.
#[derive(Copy, Clone, Debug)]
pub struct Orbit {
    c: Complex<f64>,
    z: Complex<f64>,
}

impl Orbit {
    /// Start an orbit for `c` at the origin.
    pub fn new(c: Complex<f64>) -> Self {
        Orbit {
            c,
            z: Complex::new(0.0, 0.0),
        }
    }
}

impl Iterator for Orbit {
    type Item = Complex<f64>;

    #[inline]
    fn next(&mut self) -> Option<Complex<f64>> {
        self.z = self.z * self.z + self.c;
        Some(self.z)
    }
}

/// The escape test.  Strict: a magnitude of exactly 2 has not escaped.
#[inline]
pub fn is_escaped(z: Complex<f64>) -> bool {
    z.norm() > ESCAPE_RADIUS
}

/// Returns the index of the first iterate whose magnitude exceeds 2,
/// or `max_iterations` if none of the first `max_iterations` iterates
/// do.  The result always lies in `[0, max_iterations]`.
pub fn escape_time(c: Complex<f64>, max_iterations: usize) -> Result<usize> {
    if max_iterations < 1 {
        return invalid("the iteration cap must be at least 1");
    }
    Ok(escape_time_within(c, max_iterations))
}

/// The body of [`escape_time`], for callers that validated the cap up
/// front and evaluate in a tight loop.
#[inline]
pub(crate) fn escape_time_within(c: Complex<f64>, max_iterations: usize) -> usize {
    Orbit::new(c)
        .take(max_iterations)
        .position(is_escaped)
        .unwrap_or(max_iterations)
}

/// One line of a narrated orbit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceStep {
    /// Iteration index, starting at 0.
    pub n: usize,
    /// The iterate `z_n`.
    pub z: Complex<f64>,
    /// `|z_n|`.
    pub magnitude: f64,
}

impl TraceStep {
    /// Whether this is the step on which the orbit escaped.
    pub fn escaped(&self) -> bool {
        self.magnitude > ESCAPE_RADIUS
    }
}

/// Record the first `display_cap` iterates of `c`, stopping right after
/// the first one that escapes.  Meant for walking through a handful of
/// points by hand, not for sweeping a grid.
pub fn trace(c: Complex<f64>, display_cap: usize) -> Vec<TraceStep> {
    let mut steps = Vec::with_capacity(display_cap);
    for (n, z) in Orbit::new(c).take(display_cap).enumerate() {
        let step = TraceStep {
            n,
            z,
            magnitude: z.norm(),
        };
        steps.push(step);
        if step.escaped() {
            break;
        }
    }
    steps
}

/// A labelled point used to illustrate the iteration.
#[derive(Copy, Clone, Debug)]
pub struct Landmark {
    /// Short name printed next to the point.
    pub label: &'static str,
    /// The point itself.
    pub c: Complex<f64>,
}

/// Two points inside the set and two outside, for narration.
pub const LANDMARKS: [Landmark; 4] = [
    Landmark {
        label: "A",
        c: Complex { re: -0.5, im: 0.5 },
    },
    Landmark {
        label: "B",
        c: Complex { re: -1.0, im: 0.0 },
    },
    Landmark {
        label: "C",
        c: Complex { re: 0.5, im: 0.5 },
    },
    Landmark {
        label: "D",
        c: Complex { re: 1.0, im: 0.0 },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn origin_never_escapes() {
        for max in 1..200 {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), max), Ok(max));
        }
    }

    #[test]
    fn zero_iterations_is_rejected() {
        assert!(escape_time(Complex::new(0.0, 0.0), 0).is_err());
    }

    #[test]
    fn far_points_escape_immediately() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let radius = rng.gen_range(2.0001, 1.0e6);
            let angle = rng.gen_range(0.0, 2.0 * ::std::f64::consts::PI);
            let c = Complex::from_polar(&radius, &angle);
            assert_eq!(escape_time(c, 50), Ok(0), "{:?}", c);
        }
    }

    #[test]
    fn minus_one_is_inside() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 50), Ok(50));
    }

    #[test]
    fn half_plus_half_i_escapes_quickly() {
        assert_eq!(escape_time(Complex::new(0.5, 0.5), 50), Ok(4));
    }

    #[test]
    fn magnitude_of_exactly_two_has_not_escaped() {
        // c = 1: 1, 2, 5, ...  The 2 must not count.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 50), Ok(2));
        // c = -2: -2, 2, 2, 2, ...  Sits on the boundary forever.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 50), Ok(50));
        // c = 2: 2, 6, ...
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 50), Ok(1));
    }

    #[test]
    fn raising_the_cap_keeps_a_found_escape_time() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let c = Complex::new(rng.gen_range(-2.0, 1.0), rng.gen_range(-1.5, 1.5));
            let k = escape_time(c, 64).unwrap();
            if k < 64 {
                for cap in (k + 1)..200 {
                    assert_eq!(escape_time(c, cap), Ok(k), "{:?} at cap {}", c, cap);
                }
            }
        }
    }

    #[test]
    fn trace_stops_after_the_escaping_step() {
        let steps = trace(Complex::new(0.5, 0.5), DEFAULT_DISPLAY_CAP);
        assert_eq!(steps.len(), 5);
        assert!(steps[..4].iter().all(|s| !s.escaped()));
        assert!(steps[4].escaped());
        assert_eq!(steps[0].z, Complex::new(0.5, 0.5));
        assert_eq!(steps[1].z, Complex::new(0.5, 1.0));
    }

    #[test]
    fn trace_of_an_inside_point_fills_the_cap() {
        let steps = trace(Complex::new(-1.0, 0.0), DEFAULT_DISPLAY_CAP);
        assert_eq!(steps.len(), DEFAULT_DISPLAY_CAP);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.n, i);
            let expected = if i % 2 == 0 { -1.0 } else { 0.0 };
            assert_eq!(step.z, Complex::new(expected, 0.0));
        }
    }

    #[test]
    fn trace_agrees_with_escape_time() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let c = Complex::new(rng.gen_range(-2.5, 1.5), rng.gen_range(-1.5, 1.5));
            let steps = trace(c, DEFAULT_DISPLAY_CAP);
            let last = steps[steps.len() - 1];
            match escape_time(c, DEFAULT_DISPLAY_CAP).unwrap() {
                DEFAULT_DISPLAY_CAP => assert!(!last.escaped()),
                k => {
                    assert!(last.escaped());
                    assert_eq!(last.n, k);
                }
            }
        }
    }

    #[test]
    fn trace_with_no_room_is_empty() {
        assert!(trace(Complex::new(3.0, 0.0), 0).is_empty());
    }

    #[test]
    fn landmarks_split_two_and_two() {
        let inside: Vec<&str> = LANDMARKS
            .iter()
            .filter(|l| escape_time(l.c, 50) == Ok(50))
            .map(|l| l.label)
            .collect();
        assert_eq!(inside, vec!["A", "B"]);
    }
}
