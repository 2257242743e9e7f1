//! Style types for Canvas 2D operations.

use std::fmt;
use std::str::FromStr;

use crate::error::Canvas2dError;
use crate::geometry::CanvasColor;

/// Fill style for Canvas 2D operations.
///
/// Only solid colors are supported; this context has no gradients or patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStyle {
    /// Solid color fill.
    Color(tiny_skia::Color),
}

impl Default for FillStyle {
    fn default() -> Self {
        // Default is opaque black
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

impl FillStyle {
    /// Serialize the style the way `ctx.fillStyle` reads back in browsers:
    /// `#rrggbb` for opaque colors, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        match self {
            FillStyle::Color(color) => {
                let c = CanvasColor::from(*color);
                if c.a == 255 {
                    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
                } else {
                    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, color.alpha())
                }
            }
        }
    }
}

/// Canvas `globalCompositeOperation` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOperation {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
}

impl CompositeOperation {
    /// The CSS keyword for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeOperation::SourceOver => "source-over",
            CompositeOperation::SourceIn => "source-in",
            CompositeOperation::SourceOut => "source-out",
            CompositeOperation::SourceAtop => "source-atop",
            CompositeOperation::DestinationOver => "destination-over",
            CompositeOperation::DestinationIn => "destination-in",
            CompositeOperation::DestinationOut => "destination-out",
            CompositeOperation::DestinationAtop => "destination-atop",
            CompositeOperation::Lighter => "lighter",
            CompositeOperation::Copy => "copy",
            CompositeOperation::Xor => "xor",
            CompositeOperation::Multiply => "multiply",
            CompositeOperation::Screen => "screen",
            CompositeOperation::Overlay => "overlay",
            CompositeOperation::Darken => "darken",
            CompositeOperation::Lighten => "lighten",
        }
    }

    /// Whether the operation also changes destination pixels the source does not cover.
    pub fn is_unbounded(&self) -> bool {
        matches!(
            self,
            CompositeOperation::SourceIn
                | CompositeOperation::SourceOut
                | CompositeOperation::DestinationIn
                | CompositeOperation::DestinationAtop
                | CompositeOperation::Copy
        )
    }
}

impl fmt::Display for CompositeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositeOperation {
    type Err = Canvas2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "source-over" => CompositeOperation::SourceOver,
            "source-in" => CompositeOperation::SourceIn,
            "source-out" => CompositeOperation::SourceOut,
            "source-atop" => CompositeOperation::SourceAtop,
            "destination-over" => CompositeOperation::DestinationOver,
            "destination-in" => CompositeOperation::DestinationIn,
            "destination-out" => CompositeOperation::DestinationOut,
            "destination-atop" => CompositeOperation::DestinationAtop,
            "lighter" => CompositeOperation::Lighter,
            "copy" => CompositeOperation::Copy,
            "xor" => CompositeOperation::Xor,
            "multiply" => CompositeOperation::Multiply,
            "screen" => CompositeOperation::Screen,
            "overlay" => CompositeOperation::Overlay,
            "darken" => CompositeOperation::Darken,
            "lighten" => CompositeOperation::Lighten,
            other => {
                return Err(Canvas2dError::UnknownCompositeOperation(
                    other.to_string(),
                ))
            }
        };
        Ok(op)
    }
}

impl From<CompositeOperation> for tiny_skia::BlendMode {
    fn from(op: CompositeOperation) -> Self {
        match op {
            CompositeOperation::SourceOver => tiny_skia::BlendMode::SourceOver,
            CompositeOperation::SourceIn => tiny_skia::BlendMode::SourceIn,
            CompositeOperation::SourceOut => tiny_skia::BlendMode::SourceOut,
            CompositeOperation::SourceAtop => tiny_skia::BlendMode::SourceAtop,
            CompositeOperation::DestinationOver => tiny_skia::BlendMode::DestinationOver,
            CompositeOperation::DestinationIn => tiny_skia::BlendMode::DestinationIn,
            CompositeOperation::DestinationOut => tiny_skia::BlendMode::DestinationOut,
            CompositeOperation::DestinationAtop => tiny_skia::BlendMode::DestinationAtop,
            CompositeOperation::Lighter => tiny_skia::BlendMode::Plus,
            CompositeOperation::Copy => tiny_skia::BlendMode::Source,
            CompositeOperation::Xor => tiny_skia::BlendMode::Xor,
            CompositeOperation::Multiply => tiny_skia::BlendMode::Multiply,
            CompositeOperation::Screen => tiny_skia::BlendMode::Screen,
            CompositeOperation::Overlay => tiny_skia::BlendMode::Overlay,
            CompositeOperation::Darken => tiny_skia::BlendMode::Darken,
            CompositeOperation::Lighten => tiny_skia::BlendMode::Lighten,
        }
    }
}
