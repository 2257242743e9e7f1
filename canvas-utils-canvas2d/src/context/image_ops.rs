//! Image drawing, pixel data, and PNG output operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{CanvasPixmapRef, ImageDestination};
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Draw a premultiplied-alpha pixmap scaled into `dest`.
    ///
    /// Uses the current global alpha and composite operation.
    pub fn draw_pixmap_scaled(&mut self, image: CanvasPixmapRef<'_>, dest: &ImageDestination) {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} -> {} {} {}x{}",
            image.width,
            image.height,
            dest.x,
            dest.y,
            dest.width,
            dest.height
        );
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(pixmap) = tiny_skia::PixmapRef::from_bytes(image.data, image.width, image.height)
        else {
            return;
        };
        let mut paint = tiny_skia::PixmapPaint {
            opacity: self.state.global_alpha,
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };

        let scale_x = dest.width / image.width as f32;
        let scale_y = dest.height / image.height as f32;
        let transform = Transform::from_translate(dest.x, dest.y).pre_scale(scale_x, scale_y);

        self.composite(|target, blend_mode| {
            paint.blend_mode = blend_mode;
            target.draw_pixmap(0, 0, pixmap, &paint, transform, None);
        });
    }

    /// Draw another canvas scaled into `dest`.
    pub fn draw_canvas_scaled(&mut self, source: &Canvas2dContext, dest: &ImageDestination) {
        self.draw_pixmap_scaled(source.pixmap.as_ref().into(), dest);
    }

    /// Borrow the canvas pixels (premultiplied RGBA).
    pub fn pixmap_ref(&self) -> CanvasPixmapRef<'_> {
        self.pixmap.as_ref().into()
    }

    /// Copy the canvas into an owned pixmap.
    pub fn to_pixmap(&self) -> tiny_skia::Pixmap {
        self.pixmap.clone()
    }

    /// Get non-premultiplied RGBA data for a region of the canvas.
    ///
    /// Pixels outside the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; rgba_len(width, height)];

        for dy in 0..height {
            let src_y = i64::from(y) + i64::from(dy);
            if src_y < 0 || src_y >= i64::from(self.height) {
                continue;
            }
            for dx in 0..width {
                let src_x = i64::from(x) + i64::from(dx);
                if src_x < 0 || src_x >= i64::from(self.width) {
                    continue;
                }
                let Some(pixel) = self.pixmap.pixel(src_x as u32, src_y as u32) else {
                    continue;
                };
                let c = pixel.demultiply();
                let dst_idx = (dy as usize * width as usize + dx as usize) * 4;
                data[dst_idx..dst_idx + 4]
                    .copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }

        data
    }

    /// Replace the whole canvas with non-premultiplied RGBA data.
    ///
    /// Bypasses compositing, like `putImageData`.
    pub fn put_image_data(&mut self, data: &[u8]) -> Canvas2dResult<()> {
        let expected = rgba_len(self.width, self.height);
        if data.len() != expected {
            return Err(Canvas2dError::ImageDataSize {
                width: self.width,
                height: self.height,
                len: data.len(),
            });
        }
        for (dst, src) in self
            .pixmap
            .pixels_mut()
            .iter_mut()
            .zip(data.chunks_exact(4))
        {
            *dst = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(())
    }

    /// Export the canvas as PNG data.
    ///
    /// `ppi` sets the pixel density metadata, defaulting to 72.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

/// Byte length of a `width`×`height` RGBA buffer.
fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
