use serde::{Deserialize, Serialize};

use crate::context::RenderingContext;
use crate::error::CanvasUtilsResult;

/// Rendered size of a piece of text.
///
/// `height` is the inked ascent above the baseline; descenders are not included.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Measure `text` in `font`.
///
/// The context's font is left set to `font` afterwards.
pub fn measure_text<C: RenderingContext>(
    ctx: &mut C,
    font: &str,
    text: &str,
) -> CanvasUtilsResult<TextSize> {
    ctx.set_font(font)?;
    let metrics = ctx.measure_text(text);
    Ok(TextSize {
        width: metrics.width,
        height: metrics.actual_bounding_box_ascent,
    })
}
