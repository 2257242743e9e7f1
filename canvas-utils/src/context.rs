//! The drawing surface the helpers are written against.

use canvas_utils_canvas2d::{
    ArcParams, Canvas2dContext, CanvasPixmapRef, CompositeOperation, ImageDestination,
    RectParams, TextMetrics,
};

use crate::error::CanvasUtilsResult;

/// Canvas 2D primitives used by [`crate::CanvasUtilsExt`].
pub trait RenderingContext: Sized {
    /// A blank surface of the same kind, for intermediate compositing.
    fn create_offscreen(&self, width: u32, height: u32) -> CanvasUtilsResult<Self>;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_font(&mut self, font: &str) -> CanvasUtilsResult<()>;
    fn font(&self) -> String;

    fn set_fill_style(&mut self, style: &str) -> CanvasUtilsResult<()>;
    fn fill_style(&self) -> String;

    fn set_global_composite_operation(&mut self, op: CompositeOperation);
    fn global_composite_operation(&self) -> CompositeOperation;

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn arc(&mut self, params: &ArcParams);
    fn fill(&mut self);
    fn clear_rect(&mut self, params: &RectParams);

    fn draw_image(&mut self, image: CanvasPixmapRef<'_>, dest: &ImageDestination);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn measure_text(&mut self, text: &str) -> TextMetrics;

    /// Borrow the current pixels (premultiplied RGBA).
    fn snapshot(&self) -> CanvasPixmapRef<'_>;
}

impl RenderingContext for Canvas2dContext {
    fn create_offscreen(&self, width: u32, height: u32) -> CanvasUtilsResult<Self> {
        Ok(Canvas2dContext::offscreen(width, height)?)
    }

    fn width(&self) -> u32 {
        Canvas2dContext::width(self)
    }

    fn height(&self) -> u32 {
        Canvas2dContext::height(self)
    }

    fn set_font(&mut self, font: &str) -> CanvasUtilsResult<()> {
        Ok(Canvas2dContext::set_font(self, font)?)
    }

    fn font(&self) -> String {
        Canvas2dContext::font(self).to_string()
    }

    fn set_fill_style(&mut self, style: &str) -> CanvasUtilsResult<()> {
        Ok(Canvas2dContext::set_fill_style(self, style)?)
    }

    fn fill_style(&self) -> String {
        Canvas2dContext::fill_style(self)
    }

    fn set_global_composite_operation(&mut self, op: CompositeOperation) {
        self.set_composite_operation(op);
    }

    fn global_composite_operation(&self) -> CompositeOperation {
        Canvas2dContext::global_composite_operation(self)
    }

    fn begin_path(&mut self) {
        Canvas2dContext::begin_path(self);
    }

    fn close_path(&mut self) {
        Canvas2dContext::close_path(self);
    }

    fn arc(&mut self, params: &ArcParams) {
        Canvas2dContext::arc(self, params);
    }

    fn fill(&mut self) {
        Canvas2dContext::fill(self);
    }

    fn clear_rect(&mut self, params: &RectParams) {
        Canvas2dContext::clear_rect(self, params);
    }

    fn draw_image(&mut self, image: CanvasPixmapRef<'_>, dest: &ImageDestination) {
        self.draw_pixmap_scaled(image, dest);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        Canvas2dContext::fill_text(self, text, x, y);
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        Canvas2dContext::measure_text(self, text)
    }

    fn snapshot(&self) -> CanvasPixmapRef<'_> {
        self.pixmap_ref()
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! A context that records calls instead of drawing.

    use super::*;
    use canvas_utils_canvas2d::tiny_skia::Pixmap;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        SetFont(String),
        SetFillStyle(String),
        Composite(CompositeOperation),
        BeginPath,
        ClosePath,
        Arc(ArcParams),
        Fill,
        ClearRect(RectParams),
        DrawImage { width: u32, height: u32, dest: ImageDestination },
        FillText { text: String, x: f32, y: f32 },
    }

    /// Measures every character as `char_width` wide and `ascent` tall.
    pub struct RecordingContext {
        pub ops: Vec<Op>,
        pub char_width: f32,
        pub ascent: f32,
        font: String,
        fill_style: String,
        composite: CompositeOperation,
        pixmap: Pixmap,
    }

    impl RecordingContext {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                ops: Vec::new(),
                char_width: 6.0,
                ascent: 9.0,
                font: "10px sans-serif".to_string(),
                fill_style: "#000000".to_string(),
                composite: CompositeOperation::SourceOver,
                pixmap: Pixmap::new(width, height).unwrap(),
            }
        }
    }

    impl RenderingContext for RecordingContext {
        fn create_offscreen(&self, width: u32, height: u32) -> CanvasUtilsResult<Self> {
            Ok(Self::new(width, height))
        }

        fn width(&self) -> u32 {
            self.pixmap.width()
        }

        fn height(&self) -> u32 {
            self.pixmap.height()
        }

        fn set_font(&mut self, font: &str) -> CanvasUtilsResult<()> {
            self.font = font.to_string();
            self.ops.push(Op::SetFont(font.to_string()));
            Ok(())
        }

        fn font(&self) -> String {
            self.font.clone()
        }

        fn set_fill_style(&mut self, style: &str) -> CanvasUtilsResult<()> {
            self.fill_style = style.to_string();
            self.ops.push(Op::SetFillStyle(style.to_string()));
            Ok(())
        }

        fn fill_style(&self) -> String {
            self.fill_style.clone()
        }

        fn set_global_composite_operation(&mut self, op: CompositeOperation) {
            self.composite = op;
            self.ops.push(Op::Composite(op));
        }

        fn global_composite_operation(&self) -> CompositeOperation {
            self.composite
        }

        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }

        fn close_path(&mut self) {
            self.ops.push(Op::ClosePath);
        }

        fn arc(&mut self, params: &ArcParams) {
            self.ops.push(Op::Arc(*params));
        }

        fn fill(&mut self) {
            self.ops.push(Op::Fill);
        }

        fn clear_rect(&mut self, params: &RectParams) {
            self.ops.push(Op::ClearRect(*params));
        }

        fn draw_image(&mut self, image: CanvasPixmapRef<'_>, dest: &ImageDestination) {
            self.ops.push(Op::DrawImage {
                width: image.width,
                height: image.height,
                dest: *dest,
            });
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32) {
            self.ops.push(Op::FillText {
                text: text.to_string(),
                x,
                y,
            });
        }

        fn measure_text(&mut self, text: &str) -> TextMetrics {
            TextMetrics {
                width: self.char_width * text.chars().count() as f32,
                actual_bounding_box_ascent: self.ascent,
                ..TextMetrics::default()
            }
        }

        fn snapshot(&self) -> CanvasPixmapRef<'_> {
            self.pixmap.as_ref().into()
        }
    }
}
