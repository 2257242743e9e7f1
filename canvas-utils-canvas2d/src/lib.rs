//! Minimal Canvas 2D rendering context using tiny-skia and cosmic-text.
//!
//! Covers the subset of the Canvas 2D API that the canvas-utils helpers draw
//! with: solid fill styles, composite operations, arcs and rectangles, scaled
//! image drawing, and text filling/measurement. It uses:
//! - `tiny-skia` for rasterization
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for the font database (shareable between contexts)
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas_utils_canvas2d::{ArcParams, Canvas2dContext};
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.begin_path();
//! ctx.arc(&ArcParams { x: 200.0, y: 150.0, radius: 50.0, start_angle: 0.0,
//!     end_angle: std::f32::consts::TAU, anticlockwise: false });
//! ctx.fill();
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod style;
mod text;

pub use context::Canvas2dContext;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{
    font_config_to_fontdb, CustomFont, FontConfig, FontSlant, GenericFamilyMap,
    ResolvedFontConfig,
};
pub use font_parser::{parse_font, ParsedFont, DEFAULT_FONT};
pub use geometry::{ArcParams, CanvasColor, CanvasPixmapRef, ImageDestination, RectParams};
pub use style::{CompositeOperation, FillStyle};
pub use text::TextMetrics;

// Re-exported so downstream crates can hold pixmaps without a direct dependency.
pub use tiny_skia;
