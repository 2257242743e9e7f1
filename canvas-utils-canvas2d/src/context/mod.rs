//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{font_config_to_fontdb, FontConfig, ResolvedFontConfig};
use crate::geometry::CanvasColor;
use crate::style::{CompositeOperation, FillStyle};
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Canvas 2D rendering context.
pub struct Canvas2dContext {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Pixel buffer (premultiplied RGBA).
    pub(crate) pixmap: Pixmap,
    pub(crate) font_system: FontSystem,
    /// Glyph outline cache.
    pub(crate) swash_cache: SwashCache,
    pub(crate) state: DrawingState,
    state_stack: Vec<DrawingState>,
    /// Current path, in device coordinates.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    pub(crate) has_current_point: bool,
}

impl Canvas2dContext {
    /// Create a new context using `FontConfig::default()` (system fonts).
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_config(width, height, FontConfig::default())
    }

    /// Create a new context with the given font configuration.
    pub fn with_config(width: u32, height: u32, config: FontConfig) -> Canvas2dResult<Self> {
        Self::new_internal(width, height, font_config_to_fontdb(&config))
    }

    /// Create a new context sharing a pre-resolved font database.
    ///
    /// The database is cloned rather than rebuilt, so no filesystem scan happens.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        Self::new_internal(width, height, resolved.fontdb.clone())
    }

    /// Create an offscreen context without any fonts, for pixel compositing only.
    pub fn offscreen(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::new_internal(width, height, fontdb::Database::new())
    }

    fn new_internal(width: u32, height: u32, font_db: fontdb::Database) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), font_db);

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            has_current_point: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Style ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    /// The current fill style, serialized as CSS.
    pub fn fill_style(&self) -> String {
        self.state.fill_style.to_css()
    }

    /// Set the global alpha. Non-finite values or values outside [0, 1] are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Set the global composite operation.
    ///
    /// Unknown keywords are ignored and the previous mode is kept.
    /// Returns true if the value was accepted.
    pub fn set_global_composite_operation(&mut self, op: &str) -> bool {
        match op.parse::<CompositeOperation>() {
            Ok(mode) => {
                self.set_composite_operation(mode);
                true
            }
            Err(_) => false,
        }
    }

    /// Typed form of [`Canvas2dContext::set_global_composite_operation`].
    pub fn set_composite_operation(&mut self, op: CompositeOperation) {
        log::debug!(target: "canvas", "globalCompositeOperation {op}");
        self.state.global_composite_operation = op;
    }

    pub fn global_composite_operation(&self) -> CompositeOperation {
        self.state.global_composite_operation
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_defaults() {
        let ctx = Canvas2dContext::offscreen(200, 150).unwrap();
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert_eq!(ctx.state.global_alpha, 1.0);
        assert_eq!(ctx.fill_style(), "#000000");
        assert_eq!(ctx.font(), "10px sans-serif");
        assert_eq!(
            ctx.global_composite_operation(),
            CompositeOperation::SourceOver
        );
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas2dContext::offscreen(0, 100),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::offscreen(100, MAX_DIMENSION + 1),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_fill_style_round_trip() {
        let mut ctx = Canvas2dContext::offscreen(10, 10).unwrap();
        ctx.set_fill_style("#fff").unwrap();
        assert_eq!(ctx.fill_style(), "#ffffff");
        ctx.set_fill_style_color(CanvasColor::from_rgb8(18, 52, 86));
        assert_eq!(ctx.fill_style(), "#123456");
        assert!(ctx.set_fill_style("not-a-color").is_err());
        assert_eq!(ctx.fill_style(), "#123456");
    }

    #[test]
    fn test_global_composite_operation_ignore_invalid() {
        let mut ctx = Canvas2dContext::offscreen(10, 10).unwrap();
        assert!(ctx.set_global_composite_operation("destination-in"));
        assert_eq!(
            ctx.global_composite_operation(),
            CompositeOperation::DestinationIn
        );

        assert!(!ctx.set_global_composite_operation("invalid-mode"));
        assert_eq!(
            ctx.global_composite_operation(),
            CompositeOperation::DestinationIn
        );
    }

    #[test]
    fn test_global_alpha_ignore_invalid() {
        let mut ctx = Canvas2dContext::offscreen(10, 10).unwrap();
        ctx.set_global_alpha(0.5);
        ctx.set_global_alpha(2.0);
        ctx.set_global_alpha(f32::NAN);
        assert_eq!(ctx.state.global_alpha, 0.5);
    }

    #[test]
    fn test_save_restore() {
        let mut ctx = Canvas2dContext::offscreen(10, 10).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.save();
        ctx.set_fill_style("#00ff00").unwrap();
        ctx.set_global_composite_operation("copy");
        ctx.restore();
        assert_eq!(ctx.fill_style(), "#ff0000");
        assert_eq!(
            ctx.global_composite_operation(),
            CompositeOperation::SourceOver
        );
    }
}
