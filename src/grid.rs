// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the GridSpec struct, which describes a rectangle on the
//! complex plane sampled at a fixed step, and relates every sample to a
//! pixel on an integral plane with its origin at the upper left.
use error::{invalid, Result};
use itertools::Itertools;
use num::Complex;

/// The most samples a grid may hold.  Each sample costs a `usize` of
/// escape time plus a pixel, so this bounds a sweep at a few gigabytes.
pub const MAX_SAMPLES: usize = 1 << 28;

/// Describes the column and row of a pixel in the output image.  Row 0
/// is the top of the image, which is the largest imaginary part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// One closed interval of an axis, swept at `step`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    /// The first value sampled.
    pub start: f64,
    /// The last value, inclusive.
    pub end: f64,
    /// The distance between samples.
    pub step: f64,
    count: usize,
}

impl Axis {
    /// Build an axis.  The end is extended by half a step before
    /// counting, so an end that sits on a step boundary is always
    /// sampled despite rounding in the division.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Axis> {
        if !(start.is_finite() && end.is_finite()) {
            return invalid("axis bounds must be finite");
        }
        if !step.is_finite() || step <= 0.0 {
            return invalid(format!("step must be positive, got {}", step));
        }
        if end < start {
            return invalid(format!("axis end {} is below its start {}", end, start));
        }
        let steps = ((end - start) / step + 0.5).floor();
        // The count becomes an image dimension, which is a u32.
        if !steps.is_finite() || steps >= f64::from(::std::u32::MAX) {
            return invalid(format!(
                "{} to {} at step {} has too many samples",
                start, end, step
            ));
        }
        let count = steps as usize + 1;
        Ok(Axis {
            start,
            end,
            step,
            count,
        })
    }

    /// The number of samples along the axis.
    pub fn len(&self) -> usize {
        self.count
    }

    /// An axis always has at least its start.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `i`th sample.  Computed by multiplication rather than by
    /// accumulating the step, so the error does not grow along the axis.
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.start + (i as f64) * self.step
    }

    /// Every sample, in increasing order.
    pub fn values<'a>(&'a self) -> impl Iterator<Item = f64> + 'a {
        (0..self.count).map(move |i| self.value(i))
    }
}

/// The rectangular sampling domain: a real axis and an imaginary axis
/// sharing one step size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Real part, left to right.
    pub real: Axis,
    /// Imaginary part, bottom to top.
    pub imag: Axis,
}

impl GridSpec {
    /// Constructor.  Takes the real range, the imaginary range, and the
    /// step size used for both.
    pub fn new(real: (f64, f64), imag: (f64, f64), step: f64) -> Result<GridSpec> {
        let real = Axis::new(real.0, real.1, step)?;
        let imag = Axis::new(imag.0, imag.1, step)?;
        match real.len().checked_mul(imag.len()) {
            Some(samples) if samples <= MAX_SAMPLES => Ok(GridSpec { real, imag }),
            _ => invalid(format!(
                "a {}x{} grid exceeds the limit of {} samples",
                real.len(),
                imag.len(),
                MAX_SAMPLES
            )),
        }
    }

    /// Image width: one column per real sample.
    pub fn width(&self) -> usize {
        self.real.len()
    }

    /// Image height: one row per imaginary sample.
    pub fn height(&self) -> usize {
        self.imag.len()
    }

    /// The total number of samples, at most [`MAX_SAMPLES`].  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Never true for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral plane, return the sample of the
    /// complex plane it stands for.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.real.value(pixel.0),
            self.imag.value(self.height() - 1 - pixel.1),
        )
    }

    /// The linear offset of a pixel in a row-major buffer.
    pub fn pixel_to_offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.width() + pixel.0
    }

    /// The samples of one image row, left to right.
    pub fn row<'a>(&'a self, row: usize) -> impl Iterator<Item = Complex<f64>> + 'a {
        (0..self.width()).map(move |column| self.pixel_to_point(&Pixel(column, row)))
    }

    /// Every pixel with its sample, row by row from the top.
    pub fn samples<'a>(&'a self) -> impl Iterator<Item = (Pixel, Complex<f64>)> + 'a {
        (0..self.height())
            .cartesian_product(0..self.width())
            .map(move |(row, column)| {
                let pixel = Pixel(column, row);
                (pixel, self.pixel_to_point(&pixel))
            })
    }
}
