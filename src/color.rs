// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors and the anchor palettes used to build gradients.
//!
//! Channels are stored as sRGB-encoded reals in `[0, 1]` and blended
//! as-is, without converting to linear light first.  That is the usual
//! behavior of plotting tools and is what the palettes below were tuned
//! against.

use image::Rgb;
use std::str::FromStr;

/// An RGB color with channels in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Build a color from unit-range channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Build a color from a 24-bit `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
        Color::new(channel(16), channel(8), channel(0))
    }

    /// Per-channel linear blend: `t == 0` is `self`, `t == 1` is `other`.
    #[inline]
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Quantize to 8 bits per channel for image output.
    pub fn to_rgb8(&self) -> Rgb<u8> {
        let quantize = |v: f64| (v.max(0.0).min(1.0) * 255.0).round() as u8;
        Rgb([quantize(self.r), quantize(self.g), quantize(self.b)])
    }
}

/// `#000000`
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
/// `#ffffff`
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
/// `#ff0000`
pub const RED: Color = Color::new(1.0, 0.0, 0.0);
/// `#00ff00`
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
/// `#0000ff`
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
/// `#ffff00`
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

/// The named anchor lists the command line offers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Palette {
    /// Black, blue, green, yellow, red.
    Classic,
    /// Black through deep red and orange to pale yellow.
    Fire,
    /// Black through navy and teal to light cyan.
    Ocean,
    /// Black to white.
    Grayscale,
}

impl Palette {
    /// Every palette, in the order they are listed in help text.
    pub const ALL: [Palette; 4] = [
        Palette::Classic,
        Palette::Fire,
        Palette::Ocean,
        Palette::Grayscale,
    ];

    /// The name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Palette::Classic => "classic",
            Palette::Fire => "fire",
            Palette::Ocean => "ocean",
            Palette::Grayscale => "grayscale",
        }
    }

    /// The ordered anchors, darkest first.
    pub fn anchors(self) -> Vec<Color> {
        match self {
            Palette::Classic => vec![BLACK, BLUE, GREEN, YELLOW, RED],
            Palette::Fire => vec![
                BLACK,
                Color::from_hex(0x5a_10_02),
                Color::from_hex(0xc0_3a_08),
                Color::from_hex(0xff_a0_20),
                Color::from_hex(0xff_f4_c0),
            ],
            Palette::Ocean => vec![
                BLACK,
                Color::from_hex(0x03_1a_5c),
                Color::from_hex(0x0a_6e_b4),
                Color::from_hex(0x3c_c8_dc),
                Color::from_hex(0xd8_f8_ff),
            ],
            Palette::Grayscale => vec![BLACK, WHITE],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Classic
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .iter()
            .find(|p| p.name() == s)
            .cloned()
            .ok_or_else(|| format!("Unknown palette '{}'", s))
    }
}
