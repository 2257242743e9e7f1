//! Drawing state that can be saved and restored.

use crate::font_parser::{ParsedFont, DEFAULT_FONT};
use crate::style::{CompositeOperation, FillStyle};

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    pub fill_style: FillStyle,
    /// Current font, parsed.
    pub font: ParsedFont,
    /// The font string as last set, returned by `font()`.
    pub font_source: String,
    pub global_alpha: f32,
    pub global_composite_operation: CompositeOperation,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            font: ParsedFont::default(),
            font_source: DEFAULT_FONT.to_string(),
            global_alpha: 1.0,
            global_composite_operation: CompositeOperation::SourceOver,
        }
    }
}
