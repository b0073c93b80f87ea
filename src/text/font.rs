//! # Font Stack
//!
//! The fixed two-weight font stack threaded through measurement, line
//! breaking and rendering. Making the stack an explicit parameter (rather
//! than a module constant) keeps the engine reusable with alternate fonts
//! and lets tests swap in deterministic metrics.
//!
//! Two concrete paths:
//!
//! - **Builtin**: the embedded Spleen 12×24 bitmap face, scaled to the
//!   requested pixel size with nearest-neighbour scaling. Bold is
//!   synthesized by a shifted second pass; glyphs the face lacks render
//!   as box outlines. Always available, fully deterministic.
//! - **TTF**: caller-supplied regular and bold faces rendered through
//!   `ab_glyph` with anti-aliased coverage.
//!
//! Both paths expose one advance model used by measuring and drawing
//! alike, so wrap decisions cannot disagree with the rasterized result.

use std::path::Path;

use ab_glyph::{Font, FontArc, ScaleFont};
use serde::{Deserialize, Serialize};
use spleen_font::{FONT_12X24, PSF2Font};

use crate::error::PergaminoError;

/// Text weight. Only the two weights the stack carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Builtin bitmap cell dimensions (Spleen 12×24).
const CELL_W: usize = 12;
const CELL_H: usize = 24;

/// Baseline position within the scaled bitmap cell. PSF2 carries no
/// baseline metadata; the cell top sits at `baseline - 0.8 × size`, shared
/// by measurement and drawing so the two cannot disagree.
const BITMAP_ASCENT: f32 = 0.8;

enum FontKind {
    Bitmap,
    Ttf { regular: FontArc, bold: FontArc },
}

/// The font stack used for measuring and rasterizing element text.
pub struct FontStack {
    kind: FontKind,
}

impl Default for FontStack {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontStack {
    /// The embedded bitmap stack. Always available.
    pub fn builtin() -> Self {
        Self {
            kind: FontKind::Bitmap,
        }
    }

    /// Build a stack from in-memory TTF/OTF data for both weights.
    pub fn from_ttf_bytes(regular: &[u8], bold: &[u8]) -> Result<Self, PergaminoError> {
        let regular = FontArc::try_from_vec(regular.to_vec())
            .map_err(|e| PergaminoError::Font(e.to_string()))?;
        let bold = FontArc::try_from_vec(bold.to_vec())
            .map_err(|e| PergaminoError::Font(e.to_string()))?;
        Ok(Self {
            kind: FontKind::Ttf { regular, bold },
        })
    }

    /// Load both weights from font files on disk.
    pub fn load(regular: impl AsRef<Path>, bold: impl AsRef<Path>) -> Result<Self, PergaminoError> {
        let regular = std::fs::read(regular)?;
        let bold = std::fs::read(bold)?;
        Self::from_ttf_bytes(&regular, &bold)
    }

    /// Distance from the baseline up to the glyph top at `px` size.
    pub fn ascent(&self, px: f32) -> f32 {
        match &self.kind {
            FontKind::Bitmap => px * BITMAP_ASCENT,
            FontKind::Ttf { regular, .. } => regular.as_scaled(px).ascent(),
        }
    }

    /// Distance from the baseline down to the glyph bottom (negative).
    pub fn descent(&self, px: f32) -> f32 {
        match &self.kind {
            FontKind::Bitmap => -px * (1.0 - BITMAP_ASCENT),
            FontKind::Ttf { regular, .. } => regular.as_scaled(px).descent(),
        }
    }

    /// Width in pixels one line of text occupies at the given size and
    /// weight. Advances only, no kerning; the draw path positions glyphs
    /// with the same model.
    pub fn line_width(&self, text: &str, px: f32, weight: FontWeight) -> f32 {
        match &self.kind {
            FontKind::Bitmap => {
                let advance = px * (CELL_W as f32 / CELL_H as f32);
                text.chars().count() as f32 * advance
            }
            FontKind::Ttf { regular, bold } => {
                let font = match weight {
                    FontWeight::Normal => regular,
                    FontWeight::Bold => bold,
                };
                let scaled = font.as_scaled(px);
                text.chars()
                    .map(|ch| scaled.h_advance(font.glyph_id(ch)))
                    .sum()
            }
        }
    }

    /// Rasterize one line with its left edge at `x` and its baseline at
    /// `baseline_y`, reporting per-pixel coverage through `plot`.
    pub fn draw_line(
        &self,
        text: &str,
        px: f32,
        weight: FontWeight,
        x: f32,
        baseline_y: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        match &self.kind {
            FontKind::Bitmap => draw_bitmap_line(text, px, weight, x, baseline_y, plot),
            FontKind::Ttf { regular, bold } => {
                let font = match weight {
                    FontWeight::Normal => regular,
                    FontWeight::Bold => bold,
                };
                draw_ttf_line(font, text, px, x, baseline_y, plot);
            }
        }
    }
}

fn draw_ttf_line(
    font: &FontArc,
    text: &str,
    px: f32,
    origin_x: f32,
    baseline_y: f32,
    plot: &mut dyn FnMut(i32, i32, f32),
) {
    let scaled = font.as_scaled(px);
    let mut caret_x = origin_x;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        let advance = scaled.h_advance(glyph_id);

        let glyph = glyph_id.with_scale_and_position(px, ab_glyph::point(caret_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                plot(
                    gx as i32 + bounds.min.x as i32,
                    gy as i32 + bounds.min.y as i32,
                    coverage,
                );
            });
        }

        caret_x += advance;
    }
}

fn draw_bitmap_line(
    text: &str,
    px: f32,
    weight: FontWeight,
    origin_x: f32,
    baseline_y: f32,
    plot: &mut dyn FnMut(i32, i32, f32),
) {
    let cell_h = (px.round() as usize).max(1);
    let cell_w = ((px * CELL_W as f32 / CELL_H as f32).round() as usize).max(1);
    let advance = px * (CELL_W as f32 / CELL_H as f32);
    let top = baseline_y - px * BITMAP_ASCENT;

    // Synthetic bold: a second pass shifted right, thicker at larger sizes.
    let embolden = match weight {
        FontWeight::Normal => 0usize,
        FontWeight::Bold => ((px / 24.0).round() as usize).max(1),
    };

    let mut caret_x = origin_x;
    for ch in text.chars() {
        let cell = glyph_cell(ch);
        let mut scaled = vec![0u8; cell_w * cell_h];
        scale_bitmap(&cell, CELL_W, CELL_H, &mut scaled, cell_w, cell_h);

        let x0 = caret_x.round() as i32;
        let y0 = top.round() as i32;
        for yy in 0..cell_h {
            for xx in 0..cell_w {
                if scaled[yy * cell_w + xx] != 0 {
                    plot(x0 + xx as i32, y0 + yy as i32, 1.0);
                    for e in 1..=embolden {
                        plot(x0 + xx as i32 + e as i32, y0 + yy as i32, 1.0);
                    }
                }
            }
        }

        caret_x += advance;
    }
}

/// Fetch the 12×24 Spleen cell for a character as a 0/1 buffer, falling
/// back to a box outline for glyphs the face lacks.
fn glyph_cell(ch: char) -> Vec<u8> {
    let mut cell = vec![0u8; CELL_W * CELL_H];
    let mut spleen = PSF2Font::new(FONT_12X24).unwrap();
    let utf8 = ch.to_string();

    if let Some(glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
        for (y, row) in glyph.enumerate() {
            for (x, on) in row.enumerate() {
                if on && x < CELL_W && y < CELL_H {
                    cell[y * CELL_W + x] = 1;
                }
            }
        }
    } else if ch != ' ' {
        draw_box(&mut cell, CELL_W, CELL_H);
    }

    cell
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest
/// neighbour.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Draw a box outline in the glyph buffer (unknown-character fallback).
fn draw_box(cell: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        cell[x] = 1;
        cell[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        cell[y * width] = 1;
        cell[y * width + width - 1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect the pixels a draw call produces.
    fn drawn_pixels(fonts: &FontStack, text: &str, px: f32, weight: FontWeight) -> Vec<(i32, i32)> {
        let mut pixels = Vec::new();
        fonts.draw_line(text, px, weight, 0.0, px, &mut |x, y, coverage| {
            if coverage > 0.0 {
                pixels.push((x, y));
            }
        });
        pixels
    }

    #[test]
    fn builtin_width_is_proportional_to_length() {
        let fonts = FontStack::builtin();
        let one = fonts.line_width("A", 24.0, FontWeight::Normal);
        let four = fonts.line_width("ABCD", 24.0, FontWeight::Normal);
        assert!((four - one * 4.0).abs() < 1e-4);
    }

    #[test]
    fn builtin_width_scales_with_size() {
        let fonts = FontStack::builtin();
        let small = fonts.line_width("Hello", 12.0, FontWeight::Normal);
        let large = fonts.line_width("Hello", 24.0, FontWeight::Normal);
        assert!((large - small * 2.0).abs() < 1e-4);
    }

    #[test]
    fn builtin_draw_produces_pixels() {
        let fonts = FontStack::builtin();
        let pixels = drawn_pixels(&fonts, "A", 24.0, FontWeight::Normal);
        assert!(!pixels.is_empty());
    }

    #[test]
    fn bold_covers_at_least_as_much_as_normal() {
        let fonts = FontStack::builtin();
        let normal = drawn_pixels(&fonts, "H", 24.0, FontWeight::Normal);
        let bold = drawn_pixels(&fonts, "H", 24.0, FontWeight::Bold);
        assert!(bold.len() >= normal.len());
    }

    #[test]
    fn space_draws_nothing() {
        let fonts = FontStack::builtin();
        assert!(drawn_pixels(&fonts, " ", 24.0, FontWeight::Normal).is_empty());
    }

    #[test]
    fn empty_line_measures_zero() {
        let fonts = FontStack::builtin();
        assert_eq!(fonts.line_width("", 24.0, FontWeight::Normal), 0.0);
    }

    #[test]
    fn ascent_descent_span_the_em() {
        let fonts = FontStack::builtin();
        let span = fonts.ascent(24.0) - fonts.descent(24.0);
        assert!((span - 24.0).abs() < 1e-4);
    }

    #[test]
    fn garbage_ttf_bytes_are_rejected() {
        let result = FontStack::from_ttf_bytes(b"not a font", b"also not a font");
        assert!(matches!(result, Err(PergaminoError::Font(_))));
    }
}
