//! Raster render target backed by an RGBA image buffer.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

use super::{Paint, RenderTarget};
use crate::geometry::Rect;
use crate::template::{Color, HorizontalAlign, VerticalAlign};
use crate::text::FontStack;

/// A CPU raster surface at a fixed pixel size.
///
/// Text is drawn through the borrowed font stack, the same stack the
/// measurement step used, so wrap decisions and drawn glyphs share one
/// metrics source.
pub struct RasterTarget<'f> {
    image: RgbaImage,
    fonts: &'f FontStack,
    clip: Vec<Rect>,
}

impl<'f> RasterTarget<'f> {
    /// Create a white surface of the given pixel size.
    pub fn new(width: u32, height: u32, fonts: &'f FontStack) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba([255, 255, 255, 255])),
            fonts,
            clip: Vec::new(),
        }
    }

    /// Consume the target, yielding the rendered image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Current clip region: the intersection of every open scope.
    fn clip_rect(&self) -> Option<Rect> {
        let mut scopes = self.clip.iter();
        let first = *scopes.next()?;
        Some(scopes.fold(first, |acc, r| acc.intersect(r)))
    }
}

impl RenderTarget for RasterTarget<'_> {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn draw_background(&mut self, background: &DynamicImage) {
        let (tw, th) = (self.image.width(), self.image.height());
        let rgba = if background.width() == tw && background.height() == th {
            background.to_rgba8()
        } else {
            background
                .resize_exact(tw, th, FilterType::Triangle)
                .to_rgba8()
        };
        image::imageops::replace(&mut self.image, &rgba, 0, 0);
    }

    fn measure_width(&self, paint: &Paint, text: &str) -> f32 {
        self.fonts.line_width(text, paint.font_px, paint.weight)
    }

    fn fill_text(&mut self, paint: &Paint, text: &str, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }

        let line_width = self.measure_width(paint, text);
        let left_x = match paint.align {
            HorizontalAlign::Left => x,
            HorizontalAlign::Center => x - line_width / 2.0,
            HorizontalAlign::Right => x - line_width,
        };

        let ascent = self.fonts.ascent(paint.font_px);
        let descent = self.fonts.descent(paint.font_px);
        let baseline_y = match paint.baseline {
            VerticalAlign::Top => y + ascent,
            VerticalAlign::Middle => y + (ascent + descent) / 2.0,
            VerticalAlign::Bottom => y + descent,
        };

        let clip = self.clip_rect();
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        let color = paint.color;
        let fonts = self.fonts;
        let image = &mut self.image;

        fonts.draw_line(
            text,
            paint.font_px,
            paint.weight,
            left_x,
            baseline_y,
            &mut |px, py, coverage| {
                if coverage <= 0.0 || px < 0 || py < 0 || px >= w || py >= h {
                    return;
                }
                if let Some(c) = &clip
                    && !c.contains(px as f32, py as f32)
                {
                    return;
                }
                blend(
                    image.get_pixel_mut(px as u32, py as u32),
                    color,
                    coverage.min(1.0),
                );
            },
        );
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip.push(rect);
    }

    fn pop_clip(&mut self) {
        self.clip.pop();
    }
}

/// Source-over blend of `color` at `alpha` onto an opaque pixel.
fn blend(pixel: &mut Rgba<u8>, color: Color, alpha: f32) {
    let [r, g, b, _] = pixel.0;
    pixel.0 = [
        lerp_u8(r, color.r, alpha),
        lerp_u8(g, color.g, alpha),
        lerp_u8(b, color.b, alpha),
        255,
    ];
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontWeight;

    fn paint(align: HorizontalAlign) -> Paint {
        Paint {
            font_px: 24.0,
            weight: FontWeight::Normal,
            color: Color::BLACK,
            align,
            baseline: VerticalAlign::Top,
        }
    }

    fn dark_pixel_count(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[0] < 128).count()
    }

    /// Leftmost and rightmost dark columns.
    fn dark_extent(image: &RgbaImage) -> Option<(u32, u32)> {
        let mut min = None;
        let mut max = None;
        for (x, _, p) in image.enumerate_pixels() {
            if p.0[0] < 128 {
                min = Some(min.map_or(x, |m: u32| m.min(x)));
                max = Some(max.map_or(x, |m: u32| m.max(x)));
            }
        }
        min.zip(max)
    }

    #[test]
    fn fill_text_draws_dark_pixels() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(200, 60, &fonts);
        target.fill_text(&paint(HorizontalAlign::Left), "Hi", 10.0, 10.0);
        assert!(dark_pixel_count(target.image()) > 0);
    }

    #[test]
    fn zero_sized_clip_suppresses_all_drawing() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(200, 60, &fonts);
        target.push_clip(Rect::new(0.0, 0.0, 0.0, 0.0));
        target.fill_text(&paint(HorizontalAlign::Left), "Hi", 10.0, 10.0);
        target.pop_clip();
        assert_eq!(dark_pixel_count(target.image()), 0);
    }

    #[test]
    fn clip_bounds_drawing_to_the_rect() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(200, 60, &fonts);
        target.push_clip(Rect::new(0.0, 0.0, 14.0, 60.0));
        target.fill_text(&paint(HorizontalAlign::Left), "wide text", 0.0, 10.0);
        target.pop_clip();
        let (_, max_x) = dark_extent(target.image()).expect("some pixels");
        assert!(max_x < 14);
    }

    #[test]
    fn center_alignment_straddles_the_anchor() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(200, 60, &fonts);
        target.fill_text(&paint(HorizontalAlign::Center), "MM", 100.0, 10.0);
        let (min_x, max_x) = dark_extent(target.image()).expect("some pixels");
        assert!(min_x < 100 && max_x > 100);
    }

    #[test]
    fn right_alignment_ends_at_the_anchor() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(200, 60, &fonts);
        target.fill_text(&paint(HorizontalAlign::Right), "MM", 100.0, 10.0);
        let (_, max_x) = dark_extent(target.image()).expect("some pixels");
        assert!(max_x <= 100);
    }

    #[test]
    fn background_is_stretched_to_fill() {
        let fonts = FontStack::builtin();
        let mut target = RasterTarget::new(64, 64, &fonts);
        let bg = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([10, 200, 30, 255]),
        ));
        target.draw_background(&bg);
        for p in target.image().pixels() {
            assert_eq!(p.0[1], 200);
        }
    }
}
