//! Parameter structs for Canvas 2D drawing operations.

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// X coordinate of the arc center.
    pub x: f32,
    /// Y coordinate of the arc center.
    pub y: f32,
    /// Radius of the arc.
    pub radius: f32,
    /// Starting angle in radians.
    pub start_angle: f32,
    /// Ending angle in radians.
    pub end_angle: f32,
    /// If true, draw arc counterclockwise.
    pub anticlockwise: bool,
}

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Destination rectangle for a scaled drawImage operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDestination {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl From<tiny_skia::Color> for CanvasColor {
    fn from(c: tiny_skia::Color) -> Self {
        let c = c.to_color_u8();
        Self::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
    }
}

/// A reference to premultiplied RGBA pixel data, as stored by tiny-skia.
#[derive(Debug, Clone, Copy)]
pub struct CanvasPixmapRef<'a> {
    /// RGBA pixel data, premultiplied alpha, 4 bytes per pixel.
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> From<tiny_skia::PixmapRef<'a>> for CanvasPixmapRef<'a> {
    fn from(pixmap: tiny_skia::PixmapRef<'a>) -> Self {
        Self {
            data: pixmap.data(),
            width: pixmap.width(),
            height: pixmap.height(),
        }
    }
}
