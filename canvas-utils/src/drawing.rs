//! Drawing helpers layered on any [`RenderingContext`].

use std::f32::consts::TAU;

use canvas_utils_canvas2d::{ArcParams, CompositeOperation, ImageDestination, RectParams};
use serde::{Deserialize, Serialize};

use crate::align::{resolve_align, Anchor};
use crate::context::RenderingContext;
use crate::error::CanvasUtilsResult;
use crate::image_loading::CanvasImageSource;
use crate::metrics::measure_text;

/// Font used by [`CanvasUtilsExt::write_default`].
pub const DEFAULT_WRITE_FONT: &str = "12px \"Montserrat\"";

/// Bounding box of text drawn by [`CanvasUtilsExt::write`], in context coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WriteResult {
    pub left_x: f32,
    pub right_x: f32,
    pub top_y: f32,
    pub bottom_y: f32,
    pub center_x: f32,
    /// Baseline plus half the height, i.e. below the baseline.
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Size and radius for [`CanvasUtilsExt::round_image_canvas`].
///
/// Unset width and height fall back to the image's natural size, an unset
/// radius to half the width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundImageOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub radius: Option<f32>,
}

impl RoundImageOptions {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }
}

pub trait CanvasUtilsExt: RenderingContext {
    /// Render `image` into a new offscreen surface masked to a centered circle.
    fn round_image_canvas<I>(&self, image: &I, options: RoundImageOptions) -> CanvasUtilsResult<Self>
    where
        I: CanvasImageSource + ?Sized,
    {
        let width = options.width.unwrap_or_else(|| image.natural_width());
        let height = options.height.unwrap_or_else(|| image.natural_height());
        let radius = options.radius.unwrap_or(width as f32 * 0.5);
        log::debug!(target: "canvas", "roundImageCanvas {width}x{height} r={radius}");

        let mut surface = self.create_offscreen(width, height)?;
        surface.clear_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        });

        surface.set_global_composite_operation(CompositeOperation::SourceOver);
        surface.draw_image(
            image.pixels(),
            &ImageDestination {
                x: 0.0,
                y: 0.0,
                width: width as f32,
                height: height as f32,
            },
        );

        surface.set_fill_style("#fff")?;
        surface.set_global_composite_operation(CompositeOperation::DestinationIn);
        surface.begin_path();
        surface.arc(&ArcParams {
            x: width as f32 * 0.5,
            y: height as f32 * 0.5,
            radius,
            start_angle: 0.0,
            end_angle: TAU,
            anticlockwise: true,
        });
        surface.close_path();
        surface.fill();

        Ok(surface)
    }

    /// Draw `image` cropped to a circle into `(x, y, width, height)`.
    ///
    /// `radius` defaults to half of `width`.
    fn round_image<I>(
        &mut self,
        image: &I,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
        radius: Option<f32>,
    ) -> CanvasUtilsResult<&mut Self>
    where
        I: CanvasImageSource + ?Sized,
    {
        let options = RoundImageOptions {
            width: Some(width),
            height: Some(height),
            radius,
        };
        let surface = self.round_image_canvas(image, options)?;
        self.draw_image(
            surface.snapshot(),
            &ImageDestination {
                x,
                y,
                width: width as f32,
                height: height as f32,
            },
        );
        Ok(self)
    }

    /// Fill the arc from `start_angle` to `end_angle`, drawn anticlockwise, with the current fill style.
    fn circle(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) -> &mut Self {
        self.begin_path();
        self.arc(&ArcParams {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            anticlockwise: true,
        });
        self.close_path();
        self.fill();
        self
    }

    /// Fill `text` so that its `anchor` point lands on `(x, y)`.
    fn write(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &str,
        anchor: Anchor,
    ) -> CanvasUtilsResult<WriteResult> {
        let size = measure_text(self, font, text)?;
        let origin = resolve_align(x, y, size.width, size.height, anchor);
        self.fill_text(text, origin.x, origin.y);

        Ok(WriteResult {
            left_x: origin.x,
            right_x: origin.x + size.width,
            top_y: origin.y - size.height,
            bottom_y: origin.y,
            center_x: origin.x + size.width * 0.5,
            center_y: origin.y + size.height * 0.5,
            width: size.width,
            height: size.height,
        })
    }

    /// [`CanvasUtilsExt::write`] in [`DEFAULT_WRITE_FONT`], anchored bottom-left.
    fn write_default(&mut self, text: &str, x: f32, y: f32) -> CanvasUtilsResult<WriteResult> {
        self.write(text, x, y, DEFAULT_WRITE_FONT, Anchor::BottomLeft)
    }
}

impl<C: RenderingContext> CanvasUtilsExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::recording::{Op, RecordingContext};
    use canvas_utils_canvas2d::tiny_skia::Pixmap;

    #[test]
    fn test_circle_is_anticlockwise() {
        let mut ctx = RecordingContext::new(50, 50);
        ctx.circle(10.0, 20.0, 5.0, 0.0, 1.5);
        assert_eq!(
            ctx.ops,
            vec![
                Op::BeginPath,
                Op::Arc(ArcParams {
                    x: 10.0,
                    y: 20.0,
                    radius: 5.0,
                    start_angle: 0.0,
                    end_angle: 1.5,
                    anticlockwise: true,
                }),
                Op::ClosePath,
                Op::Fill,
            ]
        );
    }

    #[test]
    fn test_circle_does_not_touch_fill_style() {
        let mut ctx = RecordingContext::new(50, 50);
        ctx.set_fill_style("#123456").unwrap();
        ctx.circle(0.0, 0.0, 1.0, 0.0, TAU).circle(5.0, 5.0, 1.0, 0.0, TAU);
        assert_eq!(ctx.fill_style(), "#123456");
        assert_eq!(ctx.ops.iter().filter(|op| **op == Op::Fill).count(), 2);
    }

    #[test]
    fn test_write_box_matches_measurement_for_every_anchor() {
        for anchor in Anchor::ALL {
            let mut ctx = RecordingContext::new(200, 200);
            let result = ctx.write("hello", 100.0, 100.0, "14px serif", anchor).unwrap();
            assert_eq!(result.right_x - result.left_x, result.width, "{anchor}");
            assert_eq!(result.bottom_y - result.top_y, result.height, "{anchor}");
            assert_eq!(result.width, 30.0);
            assert_eq!(result.height, 9.0);
        }
    }

    #[test]
    fn test_write_draws_at_resolved_origin() {
        let mut ctx = RecordingContext::new(200, 200);
        let result = ctx
            .write("ab", 100.0, 100.0, "14px serif", Anchor::TopRight)
            .unwrap();
        assert_eq!(result.left_x, 88.0);
        assert_eq!(result.bottom_y, 109.0);
        assert_eq!(result.center_x, 94.0);
        assert_eq!(result.center_y, 113.5);
        assert_eq!(
            ctx.ops.last(),
            Some(&Op::FillText {
                text: "ab".into(),
                x: 88.0,
                y: 109.0
            })
        );
        assert_eq!(ctx.font(), "14px serif");
    }

    #[test]
    fn test_write_default_font_and_anchor() {
        let mut ctx = RecordingContext::new(200, 200);
        let result = ctx.write_default("x", 10.0, 30.0).unwrap();
        assert_eq!(ctx.font(), DEFAULT_WRITE_FONT);
        assert_eq!((result.left_x, result.bottom_y), (10.0, 30.0));
    }

    #[test]
    fn test_round_image_canvas_sequence_and_defaults() {
        let ctx = RecordingContext::new(10, 10);
        let image = Pixmap::new(40, 30).unwrap();
        let surface = ctx
            .round_image_canvas(&image, RoundImageOptions::default())
            .unwrap();

        assert_eq!((surface.width(), surface.height()), (40, 30));
        let full = RectParams {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 30.0,
        };
        assert_eq!(
            surface.ops,
            vec![
                Op::ClearRect(full),
                Op::Composite(CompositeOperation::SourceOver),
                Op::DrawImage {
                    width: 40,
                    height: 30,
                    dest: ImageDestination {
                        x: 0.0,
                        y: 0.0,
                        width: 40.0,
                        height: 30.0
                    },
                },
                Op::SetFillStyle("#fff".into()),
                Op::Composite(CompositeOperation::DestinationIn),
                Op::BeginPath,
                Op::Arc(ArcParams {
                    x: 20.0,
                    y: 15.0,
                    radius: 20.0,
                    start_angle: 0.0,
                    end_angle: TAU,
                    anticlockwise: true,
                }),
                Op::ClosePath,
                Op::Fill,
            ]
        );
    }

    #[test]
    fn test_round_image_draws_masked_surface() {
        let mut ctx = RecordingContext::new(100, 100);
        let image = Pixmap::new(8, 8).unwrap();
        ctx.round_image(&image, 5.0, 6.0, 20, 24, Some(3.0)).unwrap();
        assert_eq!(
            ctx.ops,
            vec![Op::DrawImage {
                width: 20,
                height: 24,
                dest: ImageDestination {
                    x: 5.0,
                    y: 6.0,
                    width: 20.0,
                    height: 24.0
                },
            }]
        );
    }
}
