//! Convenience helpers on top of a Canvas 2D context.
//!
//! - [`load_image`]: read or download an image and decode it
//! - [`CanvasUtilsExt`]: circular image crops, filled circles and anchored text
//! - [`hex_to_rgb`]: `#RRGGBB` parsing
//! - [`FontRegistry`]: register font files under family names once at startup
//!
//! ```rust,ignore
//! use canvas_utils::{load_image, Anchor, CanvasUtilsExt, FontRegistry};
//!
//! let fonts = FontRegistry::montserrat("assets/fonts")?;
//! let mut ctx = fonts.create_canvas(400, 200)?;
//! let avatar = load_image("https://example.com/avatar.png", false).await?;
//! ctx.round_image(&avatar, 10.0, 10.0, 64, 64, None)?;
//! let name = ctx.write("Jane", 84.0, 42.0, "24px \"Montserrat\"", Anchor::CenterLeft)?;
//! ```

#[macro_use]
extern crate lazy_static;

pub mod align;
pub mod color;
pub mod context;
pub mod drawing;
pub mod error;
pub mod fonts;
pub mod image_loading;
pub mod metrics;

pub use align::{resolve_align, resolve_point, Anchor, BoxSize, Point};
pub use color::{hex_to_rgb, Rgb};
pub use context::RenderingContext;
pub use drawing::{CanvasUtilsExt, RoundImageOptions, WriteResult, DEFAULT_WRITE_FONT};
pub use error::{CanvasUtilsError, CanvasUtilsResult};
pub use fonts::{FontManifest, FontRegistration, FontRegistry, FontRegistryBuilder, FontStyle};
pub use image_loading::{
    load_image, CanvasImageSource, ImageHandle, ImageLoader, ImageLoaderConfig, ImageSource,
};
pub use metrics::{measure_text, TextSize};

pub use canvas_utils_canvas2d;
