//! Fill and clear operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::style::FillStyle;
use tiny_skia::{BlendMode, Pixmap, Transform};

impl Canvas2dContext {
    /// Fill the current path with the current fill style (non-zero winding).
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        // Clone the builder so the path survives for a following fill
        let Some(path) = self.path_builder.clone().finish() else {
            self.composite(|_, _| {});
            return;
        };
        let mut paint = self.fill_paint();
        self.composite(|target, blend_mode| {
            paint.blend_mode = blend_mode;
            target.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        });
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Clear a rectangle (set pixels to transparent black).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(rect) =
            tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };
        let paint = tiny_skia::Paint {
            blend_mode: BlendMode::Clear,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Paint for the current fill style, global alpha and composite operation.
    pub(crate) fn fill_paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            blend_mode: self.state.global_composite_operation.into(),
            ..Default::default()
        };
        match self.state.fill_style {
            FillStyle::Color(mut color) => {
                if self.state.global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
                }
                paint.set_color(color);
            }
        }
        paint
    }

    /// Run `draw` against the canvas with the current composite operation.
    ///
    /// Operations such as `destination-in` also affect pixels outside the
    /// drawn shape. For those, `draw` renders source-over into a transparent
    /// layer, and the whole layer is then composited onto the canvas.
    pub(crate) fn composite<F>(&mut self, draw: F)
    where
        F: FnOnce(&mut Pixmap, BlendMode),
    {
        let op = self.state.global_composite_operation;
        if !op.is_unbounded() {
            draw(&mut self.pixmap, op.into());
            return;
        }

        let Some(mut layer) = Pixmap::new(self.width, self.height) else {
            return;
        };
        draw(&mut layer, BlendMode::SourceOver);
        let paint = tiny_skia::PixmapPaint {
            opacity: 1.0,
            blend_mode: op.into(),
            quality: tiny_skia::FilterQuality::Nearest,
        };
        self.pixmap
            .draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
    }
}
