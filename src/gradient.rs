// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A precomputed color ramp indexed directly by escape time.
//!
//! The ramp is built once for a given iteration cap and then only read,
//! so a single instance can be shared by reference across every render
//! worker without locking.

use color::Color;
use error::{invalid, Error, Result};

/// A lookup table of `len()` colors, produced by spreading the anchors
/// evenly over the table and blending linearly between neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    anchors: Vec<Color>,
    table: Vec<Color>,
}

impl ColorRamp {
    /// Build a ramp of `length` entries.  Entry 0 is exactly the first
    /// anchor and entry `length - 1` exactly the last.
    pub fn new(anchors: &[Color], length: usize) -> Result<Self> {
        if anchors.len() < 2 {
            return invalid(format!(
                "a gradient needs at least 2 anchor colors, got {}",
                anchors.len()
            ));
        }
        if length < anchors.len() {
            return invalid(format!(
                "a ramp of length {} cannot hold {} anchors",
                length,
                anchors.len()
            ));
        }

        let last_segment = anchors.len() - 2;
        let span = (anchors.len() - 1) as f64;
        let table = (0..length)
            .map(|i| {
                // Position of this entry measured in anchor units.
                let t = (i as f64) * span / ((length - 1) as f64);
                let segment = (t.floor() as usize).min(last_segment);
                anchors[segment].lerp(&anchors[segment + 1], t - segment as f64)
            })
            .collect::<Vec<Color>>();

        debug!(
            "built color ramp: {} anchors over {} entries",
            anchors.len(),
            length
        );
        Ok(ColorRamp {
            anchors: anchors.to_vec(),
            table,
        })
    }

    /// A ramp with one entry for every escape time `0..=max_iterations`.
    pub fn for_iterations(anchors: &[Color], max_iterations: usize) -> Result<Self> {
        if max_iterations < 1 {
            return invalid("the iteration cap must be at least 1");
        }
        ColorRamp::new(anchors, max_iterations + 1)
    }

    /// The color for an escape time, by direct lookup.
    #[inline]
    pub fn color_for(&self, escape_time: usize) -> Result<Color> {
        self.table
            .get(escape_time)
            .cloned()
            .ok_or_else(|| Error::IndexOutOfRange {
                index: escape_time as i64,
                len: self.table.len(),
            })
    }

    /// Like [`color_for`](#method.color_for), for callers holding a
    /// signed index.  Negative indices are out of range.
    pub fn color_at(&self, index: i64) -> Result<Color> {
        if index < 0 {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.table.len(),
            });
        }
        self.color_for(index as usize)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Never true for a successfully built ramp.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The anchors the ramp was built from.
    pub fn anchors(&self) -> &[Color] {
        &self.anchors
    }

    /// The whole table.
    pub fn table(&self) -> &[Color] {
        &self.table
    }
}
