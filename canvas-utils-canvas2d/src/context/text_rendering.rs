//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::text::{glyph_offset, glyph_path, shape_text, TextMetrics};
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the font from a CSS font string.
    ///
    /// On a parse error the previous font is kept.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "font = {font:?}");
        self.state.font = parse_font(font)?;
        self.state.font_source = font.to_string();
        Ok(())
    }

    /// The font string as last set.
    pub fn font(&self) -> &str {
        &self.state.font_source
    }

    /// Measure text in the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(
            &mut self.font_system,
            &mut self.swash_cache,
            text,
            &self.state.font,
        )
    }

    /// Fill text with its alphabetic baseline at `y` and its left edge at `x`.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        let Some(buffer) = shape_text(&mut self.font_system, text, &self.state.font) else {
            return;
        };

        let mut glyphs = Vec::new();
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let Some(path) = glyph_path(&mut self.font_system, &mut self.swash_cache, glyph)
                else {
                    continue;
                };
                let (dx, dy) = glyph_offset(glyph);
                glyphs.push((path, Transform::from_translate(x + dx, y + dy)));
            }
        }
        if glyphs.is_empty() {
            return;
        }

        let mut paint = self.fill_paint();
        self.composite(|target, blend_mode| {
            paint.blend_mode = blend_mode;
            for (path, transform) in &glyphs {
                target.fill_path(path, &paint, tiny_skia::FillRule::Winding, *transform, None);
            }
        });
    }
}
