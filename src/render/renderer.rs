//! The per-element render pipeline.
//!
//! One pipeline serves both the preview surface and the native output
//! surface; the callers below differ only in the target size and the
//! edit-space→target-space scale they feed in.

use image::RgbaImage;

use super::{Paint, RasterTarget, RenderTarget};
use crate::data::{Headers, Row, resolve};
use crate::error::PergaminoError;
use crate::geometry::{fit_ratio, to_target_space};
use crate::template::{HorizontalAlign, TemplateModel, VerticalAlign};
use crate::text::{FontStack, LINE_HEIGHT_FACTOR, wrap};

/// Render the template against one data row onto an arbitrary target.
///
/// `scale` maps edit-space onto the target's space: `1 / edit_scale_ratio`
/// for a native surface, `preview_fit / edit_scale_ratio` for a preview.
/// Elements draw in model order (z-order); each gets a freshly built
/// paint, a clip scope bounded by its box, and line-wrapped text. Lines
/// whose anchor row falls outside the box are skipped: overflow clips
/// silently rather than erroring.
pub fn render_to<T: RenderTarget>(
    target: &mut T,
    model: &TemplateModel,
    headers: &Headers,
    row: &Row,
    scale: f32,
) -> Result<(), PergaminoError> {
    let background = model.background().ok_or(PergaminoError::MissingBackground)?;
    target.draw_background(background.image());

    for element in model.elements() {
        let text = resolve(&element.text, row, headers);
        let bounds = to_target_space(element.bounds(), 1.0, scale);

        let paint = Paint {
            font_px: element.font_size * scale,
            weight: element.font_weight,
            color: element.color,
            align: element.horizontal_align,
            baseline: element.vertical_align,
        };

        let anchor_x = match element.horizontal_align {
            HorizontalAlign::Left => bounds.x,
            HorizontalAlign::Center => bounds.center_x(),
            HorizontalAlign::Right => bounds.right(),
        };
        let anchor_y = match element.vertical_align {
            VerticalAlign::Top => bounds.y,
            VerticalAlign::Middle => bounds.center_y(),
            VerticalAlign::Bottom => bounds.bottom(),
        };

        target.push_clip(bounds);

        let lines = wrap(&text, |s| target.measure_width(&paint, s), bounds.width);
        let line_height = paint.font_px * LINE_HEIGHT_FACTOR;
        for (i, line) in lines.iter().enumerate() {
            let line_y = anchor_y + i as f32 * line_height;
            if line_y < bounds.y || line_y > bounds.bottom() {
                continue;
            }
            target.fill_text(&paint, line, anchor_x, line_y);
        }

        target.pop_clip();
    }

    Ok(())
}

/// Render one row at the background's native resolution.
pub fn render_native(
    model: &TemplateModel,
    fonts: &FontStack,
    headers: &Headers,
    row: &Row,
) -> Result<RgbaImage, PergaminoError> {
    let background = model.background().ok_or(PergaminoError::MissingBackground)?;
    let (nw, nh) = (background.native_width(), background.native_height());
    let scale = 1.0 / model.edit_scale_ratio();

    let mut target = RasterTarget::new(nw, nh, fonts);
    render_to(&mut target, model, headers, row, scale)?;
    Ok(target.into_image())
}

/// Render one row at a preview resolution, fitting the native image into
/// the given display bounds.
pub fn render_preview(
    model: &TemplateModel,
    fonts: &FontStack,
    headers: &Headers,
    row: &Row,
    max_width: u32,
    max_height: u32,
) -> Result<RgbaImage, PergaminoError> {
    let background = model.background().ok_or(PergaminoError::MissingBackground)?;
    let (nw, nh) = (background.native_width(), background.native_height());
    let fit = fit_ratio(nw, nh, max_width, max_height);
    let scale = fit / model.edit_scale_ratio();

    let mut target = RasterTarget::new(
        (nw as f32 * fit) as u32,
        (nh as f32 * fit) as u32,
        fonts,
    );
    render_to(&mut target, model, headers, row, scale)?;
    Ok(target.into_image())
}
