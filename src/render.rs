// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sweeping a whole grid.
//!
//! Every sample is independent of every other, so the sweep can be
//! split across any number of threads and still produce exactly the
//! same buffer as the single-threaded version.  Work is handed out one
//! image row at a time from a shared queue, since rows through the
//! interior cost the full iteration budget per pixel.

use color::Color;
use crossbeam;
use error::{invalid, Error, Result};
use escape::escape_time_within;
use gradient::ColorRamp;
use grid::{GridSpec, Pixel};
use image::RgbImage;
use std::sync::Mutex;

/// Evaluates every sample of a grid against one iteration cap.  Once
/// built, this object is never mutated, so workers share it by
/// reference.
#[derive(Debug)]
pub struct Renderer {
    grid: GridSpec,
    max_iterations: usize,
}

impl Renderer {
    /// Requires the sampling grid and the number of iterations to
    /// perform per sample.
    pub fn new(grid: GridSpec, max_iterations: usize) -> Result<Self> {
        if max_iterations < 1 {
            return invalid("the iteration cap must be at least 1");
        }
        Ok(Renderer {
            grid,
            max_iterations,
        })
    }

    /// The grid being swept.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The per-sample iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn evaluate_row(&self, row: usize, out: &mut [usize]) {
        for (slot, c) in out.iter_mut().zip(self.grid.row(row)) {
            *slot = escape_time_within(c, self.max_iterations);
        }
    }

    /// Escape times for every sample, row-major from the top-left,
    /// computed on the calling thread.
    pub fn escape_times_single(&self) -> Vec<usize> {
        let mut buffer = vec![0 as usize; self.grid.len()];
        for (row, out) in buffer.chunks_mut(self.grid.width()).enumerate() {
            self.evaluate_row(row, out);
        }
        buffer
    }

    /// A multi-threaded version of
    /// [`escape_times_single`](#method.escape_times_single) that takes a
    /// thread count.  The result is identical for every thread count.
    pub fn escape_times(&self, threads: usize) -> Result<Vec<usize>> {
        self.sweep(threads, Renderer::evaluate_row)
    }

    /// Hands the rows of the output buffer to `threads` workers, each
    /// filling whatever row it takes next with `evaluate`.  A panic in
    /// any worker is reported as `Error::WorkerPanicked`.
    fn sweep<F>(&self, threads: usize, evaluate: F) -> Result<Vec<usize>>
    where
        F: Fn(&Renderer, usize, &mut [usize]) + Sync,
    {
        if threads < 1 {
            return invalid("at least one render thread is required");
        }
        let mut buffer = vec![0 as usize; self.grid.len()];
        {
            let rows = Mutex::new(buffer.chunks_mut(self.grid.width()).enumerate());
            let rows = &rows;
            let evaluate = &evaluate;
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    spawner.spawn(move |_| {
                        let mut done = 0;
                        loop {
                            let next = match rows.lock() {
                                Ok(mut queue) => queue.next(),
                                Err(_) => None,
                            };
                            match next {
                                Some((row, out)) => {
                                    evaluate(self, row, out);
                                    done += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        trace!("worker {} evaluated {} rows", worker, done);
                    });
                }
            })
            .map_err(|_| Error::WorkerPanicked)?;
        }
        Ok(buffer)
    }

    /// Map a buffer of escape times to an image through a ramp.  The
    /// ramp must have an entry for every escape time in the buffer,
    /// which it will if it was built for this renderer's iteration cap.
    pub fn colorize(&self, ramp: &ColorRamp, escapes: &[usize]) -> Result<RgbImage> {
        if escapes.len() != self.grid.len() {
            return invalid(format!(
                "expected {} escape times, got {}",
                self.grid.len(),
                escapes.len()
            ));
        }
        let width = self.grid.width();
        let mut image = RgbImage::new(width as u32, self.grid.height() as u32);
        for (offset, &escape) in escapes.iter().enumerate() {
            let pixel = Pixel(offset % width, offset / width);
            let color: Color = ramp.color_for(escape)?;
            image.put_pixel(pixel.0 as u32, pixel.1 as u32, color.to_rgb8());
        }
        Ok(image)
    }

    /// The main entry point: sweep the grid on `threads` workers and
    /// color the result.
    pub fn render(&self, ramp: &ColorRamp, threads: usize) -> Result<RgbImage> {
        let escapes = self.escape_times(threads)?;
        let inside = escapes
            .iter()
            .filter(|&&e| e == self.max_iterations)
            .count();
        info!(
            "evaluated {}x{} samples on {} threads, {} inside the set",
            self.grid.width(),
            self.grid.height(),
            threads,
            inside
        );
        self.colorize(ramp, &escapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::{Palette, BLACK, RED};
    use escape::escape_time;

    fn small_renderer() -> Renderer {
        let grid = GridSpec::new((-2.0, 1.0), (-1.2, 1.2), 0.05).unwrap();
        Renderer::new(grid, 50).unwrap()
    }

    #[test]
    fn renderer_rejects_zero_iterations() {
        let grid = GridSpec::new((-1.0, 1.0), (-1.0, 1.0), 0.5).unwrap();
        assert!(Renderer::new(grid, 0).is_err());
    }

    #[test]
    fn single_thread_matches_pointwise_evaluation() {
        let renderer = small_renderer();
        let escapes = renderer.escape_times_single();
        for (pixel, c) in renderer.grid().samples() {
            let offset = renderer.grid().pixel_to_offset(&pixel);
            assert_eq!(Ok(escapes[offset]), escape_time(c, 50));
        }
    }

    #[test]
    fn thread_count_does_not_change_the_result() {
        let renderer = small_renderer();
        let expected = renderer.escape_times_single();
        for threads in 1..6 {
            assert_eq!(renderer.escape_times(threads), Ok(expected.clone()));
        }
    }

    #[test]
    fn a_panicking_worker_is_reported() {
        let renderer = small_renderer();
        let result = renderer.sweep(3, |renderer, row, out| {
            if row == 5 {
                panic!("row {} cannot be evaluated", row);
            }
            renderer.evaluate_row(row, out);
        });
        assert_eq!(result, Err(Error::WorkerPanicked));
    }

    #[test]
    fn sweep_fills_every_row() {
        let renderer = small_renderer();
        let rows = renderer
            .sweep(4, |_, row, out| {
                for slot in out.iter_mut() {
                    *slot = row;
                }
            })
            .unwrap();
        for (row, out) in rows.chunks(renderer.grid().width()).enumerate() {
            assert!(out.iter().all(|&r| r == row));
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        assert!(small_renderer().escape_times(0).is_err());
    }

    #[test]
    fn escape_times_stay_in_range() {
        let renderer = small_renderer();
        assert!(renderer.escape_times_single().iter().all(|&e| e <= 50));
    }

    #[test]
    fn colorize_maps_through_the_ramp() {
        let grid = GridSpec::new((-1.0, 3.0), (0.0, 0.0), 4.0).unwrap();
        let renderer = Renderer::new(grid, 2).unwrap();
        let ramp = ColorRamp::for_iterations(&[BLACK, RED], 2).unwrap();
        let escapes = renderer.escape_times_single();
        // c = -1 stays inside, c = 3 leaves at once.
        assert_eq!(escapes, vec![2, 0]);
        let image = renderer.colorize(&ramp, &escapes).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(*image.get_pixel(0, 0), RED.to_rgb8());
        assert_eq!(*image.get_pixel(1, 0), BLACK.to_rgb8());
    }

    #[test]
    fn mismatched_ramp_is_out_of_range() {
        let renderer = small_renderer();
        let ramp = ColorRamp::for_iterations(&Palette::Classic.anchors(), 10).unwrap();
        let escapes = renderer.escape_times_single();
        match renderer.colorize(&ramp, &escapes) {
            Err(Error::IndexOutOfRange { len, .. }) => assert_eq!(len, 11),
            other => panic!("expected an out-of-range error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn render_produces_one_pixel_per_sample() {
        let renderer = small_renderer();
        let ramp = ColorRamp::for_iterations(&Palette::Classic.anchors(), 50).unwrap();
        let image = renderer.render(&ramp, 2).unwrap();
        assert_eq!(
            image.dimensions(),
            (
                renderer.grid().width() as u32,
                renderer.grid().height() as u32
            )
        );
        let origin = renderer
            .grid()
            .samples()
            .find(|(_, c)| c.norm() < 1e-9)
            .map(|(pixel, _)| pixel);
        if let Some(pixel) = origin {
            assert_eq!(*image.get_pixel(pixel.0 as u32, pixel.1 as u32), RED.to_rgb8());
        }
    }
}
