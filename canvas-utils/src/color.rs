//! Hex color parsing.

use std::fmt;
use std::str::FromStr;

use canvas_utils_canvas2d::CanvasColor;
use regex::Regex;

use crate::error::CanvasUtilsError;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"(?i)^#?([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$")
        .expect("hex color pattern is valid");
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `rgb(r, g, b)`, usable as a fill style.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = CanvasUtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| CanvasUtilsError::InvalidHexColor(s.to_string()))
    }
}

impl From<Rgb> for CanvasColor {
    fn from(rgb: Rgb) -> Self {
        CanvasColor::from_rgb8(rgb.r, rgb.g, rgb.b)
    }
}

/// Parse `#RRGGBB` / `RRGGBB` (case-insensitive) into an [`Rgb`].
///
/// Shorthand (`#fff`), alpha (`#rrggbbaa`) and anything else malformed gives `None`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let caps = HEX_COLOR.captures(hex)?;
    let channel = |idx: usize| u8::from_str_radix(&caps[idx], 16).ok();
    Some(Rgb {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}
