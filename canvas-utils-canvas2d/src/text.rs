//! Text shaping and measurement using cosmic-text.

use crate::font_parser::ParsedFont;
use cosmic_text::{
    Attrs, Buffer, CacheKeyFlags, Command, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache,
};

/// Text metrics returned by `measure_text()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from the baseline to the top of the inked glyphs.
    pub actual_bounding_box_ascent: f32,
    /// Distance from the baseline to the bottom of the inked glyphs.
    pub actual_bounding_box_descent: f32,
    /// Font ascent of the line.
    pub font_bounding_box_ascent: f32,
    /// Font descent of the line.
    pub font_bounding_box_descent: f32,
}

/// Pick the cosmic-text family for a CSS family list.
///
/// The first named family present in the font database wins; generic
/// keywords map to the generic families, and anything unresolved falls back
/// to sans-serif.
pub(crate) fn resolve_family<'a>(font_system: &FontSystem, families: &'a [String]) -> Family<'a> {
    for name in families {
        match name.to_ascii_lowercase().as_str() {
            "serif" => return Family::Serif,
            "sans-serif" => return Family::SansSerif,
            "monospace" => return Family::Monospace,
            "cursive" => return Family::Cursive,
            "fantasy" => return Family::Fantasy,
            _ => {}
        }
        let known = font_system
            .db()
            .faces()
            .any(|face| face.families.iter().any(|(family, _)| family == name));
        if known {
            return Family::Name(name);
        }
        log::debug!(target: "canvas", "font family {name:?} not registered");
    }
    Family::SansSerif
}

/// Shape `text` in `font` into a single-line buffer.
///
/// `None` when nothing can be shaped: no fonts are loaded or the size is not positive.
pub(crate) fn shape_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
) -> Option<Buffer> {
    if !font.size_px.is_finite() || font.size_px <= 0.0 {
        log::debug!(target: "canvas", "font size {} draws nothing", font.size_px);
        return None;
    }
    if font_system.db().is_empty() {
        log::warn!(target: "canvas", "no fonts loaded, skipping text {text:?}");
        return None;
    }

    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = resolve_family(font_system, &font.families);
    // Hinting off so outlines match the unhinted measurement
    let attrs = Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style)
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    Some(buffer)
}

/// Build the outline of a shaped glyph in glyph space (y down, origin on the baseline).
pub(crate) fn glyph_path(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    glyph: &LayoutGlyph,
) -> Option<tiny_skia::Path> {
    let physical = glyph.physical((0.0, 0.0), 1.0);
    let commands = swash_cache.get_outline_commands(font_system, physical.cache_key)?;

    // Font outlines have y pointing up
    let mut builder = tiny_skia::PathBuilder::new();
    for cmd in commands {
        match *cmd {
            Command::MoveTo(p) => builder.move_to(p.x, -p.y),
            Command::LineTo(p) => builder.line_to(p.x, -p.y),
            Command::QuadTo(ctrl, end) => builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y),
            Command::CurveTo(c1, c2, end) => {
                builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
            }
            Command::Close => builder.close(),
        }
    }
    builder.finish()
}

/// Offset of a glyph's origin from the text origin.
pub(crate) fn glyph_offset(glyph: &LayoutGlyph) -> (f32, f32) {
    (
        glyph.x + glyph.font_size * glyph.x_offset,
        glyph.y - glyph.font_size * glyph.y_offset,
    )
}

/// Measure text, including the inked ascent/descent from glyph outlines.
pub fn measure_text(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    text: &str,
    font: &ParsedFont,
) -> TextMetrics {
    let mut metrics = TextMetrics::default();
    let Some(buffer) = shape_text(font_system, text, font) else {
        return metrics;
    };

    for run in buffer.layout_runs() {
        metrics.width = metrics.width.max(run.line_w);
        metrics.font_bounding_box_ascent = metrics
            .font_bounding_box_ascent
            .max(run.line_y - run.line_top);
        metrics.font_bounding_box_descent = metrics
            .font_bounding_box_descent
            .max(run.line_top + run.line_height - run.line_y);

        for glyph in run.glyphs.iter() {
            let Some(bounds) = glyph_path(font_system, swash_cache, glyph)
                .and_then(|path| path.compute_tight_bounds())
            else {
                continue;
            };
            let (_, dy) = glyph_offset(glyph);
            metrics.actual_bounding_box_ascent = metrics
                .actual_bounding_box_ascent
                .max(-(bounds.top() + dy));
            metrics.actual_bounding_box_descent = metrics
                .actual_bounding_box_descent
                .max(bounds.bottom() + dy);
        }
    }
    metrics
}
