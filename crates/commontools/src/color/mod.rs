//! Color conversion between hex strings, 8-bit RGB and normalized HSL.

mod hex;
mod hsl;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use hex::{format_hex, format_hex_short, parse_hex};
pub use hsl::{hsl_to_rgb, hsl_to_rgb_unchecked, rgb_to_hsl};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hex(*self))
    }
}

impl FromStr for Rgb {
    type Err = crate::CommonToolsError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        parse_hex(s)
    }
}

/// An HSL color. All three components are fractions in `0.0..=1.0`;
/// hue is a fraction of a full turn, not degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Hsl { h, s, l }
    }

    /// True when every component lies in `0.0..=1.0`. NaN is out of range.
    pub fn is_in_range(&self) -> bool {
        [self.h, self.s, self.l]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

/// Flags selecting between the strict and the historical conversion behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOptions {
    /// Reject HSL components outside `0.0..=1.0`. When false, hue wraps and
    /// saturation/luminance are clamped instead. Default: true.
    #[serde(default = "default_true")]
    pub strict_hsl: bool,

    /// Collapse hex output to `#RGB` when every channel is digit-doubled.
    /// Default: false.
    #[serde(default)]
    pub short_hex: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ColorOptions {
    fn default() -> Self {
        ColorOptions {
            strict_hsl: true,
            short_hex: false,
        }
    }
}

/// Color conversions bound to a set of [`ColorOptions`].
///
/// `ColorConverter::default()` behaves exactly like the free functions
/// [`parse_hex`], [`format_hex`], [`hsl_to_rgb`] and [`rgb_to_hsl`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter {
    options: ColorOptions,
}

impl ColorConverter {
    pub fn new(options: ColorOptions) -> Self {
        ColorConverter { options }
    }

    pub fn options(&self) -> ColorOptions {
        self.options
    }

    pub fn parse_hex(&self, s: &str) -> crate::error::Result<Rgb> {
        parse_hex(s)
    }

    pub fn format_hex(&self, rgb: Rgb) -> String {
        if self.options.short_hex {
            format_hex_short(rgb)
        } else {
            format_hex(rgb)
        }
    }

    pub fn hsl_to_rgb(&self, h: f64, s: f64, l: f64) -> crate::error::Result<Rgb> {
        if self.options.strict_hsl {
            hsl_to_rgb(h, s, l)
        } else {
            Ok(hsl_to_rgb_unchecked(h, s, l))
        }
    }

    pub fn rgb_to_hsl(&self, rgb: Rgb) -> Hsl {
        rgb_to_hsl(rgb)
    }
}
