//! # Text Measurement and Auto-Sizing
//!
//! Computes the box a piece of element text should occupy at a given font
//! size and weight. The measured footprint is inflated by a buffer before
//! use: the interactive editor that drives this engine measures text with
//! a different rendering substrate than the raster draw path, and the two
//! can disagree by a few pixels, more for bold and for CJK
//! ideographs whose advance widths naive measurement undercounts. The
//! buffer absorbs that drift without requiring pixel-identical metrics.

use crate::data::contains_placeholder;
use crate::text::font::{FontStack, FontWeight};
use crate::text::wrap::wrap;

/// Measured footprint of a text box, in the measuring space's pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Natural widths at or below this stay single-line.
pub const SHORT_TEXT_MAX_WIDTH: f32 = 200.0;
/// Width cap applied to long literal text, forcing it to wrap.
pub const LONG_TEXT_WIDTH_CAP: f32 = 250.0;
/// Line height multiplier shared by measurement and rendering.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Hard floor for a text box width.
pub const MIN_BOX_WIDTH: f32 = 50.0;

/// Measure the box `text` should occupy at `font_size`/`weight`.
///
/// Without a width hint the text's unconstrained single-line width
/// decides: short text and placeholder-bearing text keep their natural
/// width (a substituted value rarely matches its token's length), long
/// literal text is capped and left to wrap. Height comes from laying the
/// text out at the chosen width. Degenerate inputs (empty text, zero
/// width) return the clamped minimums rather than failing.
pub fn measure(
    fonts: &FontStack,
    text: &str,
    font_size: f32,
    weight: FontWeight,
    max_width: Option<f32>,
) -> TextSize {
    let measure_line = |s: &str| fonts.line_width(s, font_size, weight);

    let box_width = match max_width {
        Some(w) => w,
        None => {
            // Natural width: the widest newline-separated line.
            let natural = text
                .split('\n')
                .map(measure_line)
                .fold(0.0f32, f32::max);
            if natural <= SHORT_TEXT_MAX_WIDTH || contains_placeholder(text) {
                natural
            } else {
                natural.min(LONG_TEXT_WIDTH_CAP)
            }
        }
    };

    // Lay the text out at that width and read its occupied footprint.
    let lines = wrap(text, measure_line, box_width);
    let content_width = lines
        .iter()
        .map(|l| measure_line(l))
        .fold(0.0f32, f32::max);
    let content_height = lines.len() as f32 * font_size * LINE_HEIGHT_FACTOR;

    let cjk = contains_cjk(text);
    let bold = weight == FontWeight::Bold;

    let base_width_buffer = if bold {
        (font_size * if cjk { 0.5 } else { 0.4 }).ceil().max(16.0)
    } else {
        (font_size * if cjk { 0.4 } else { 0.3 }).ceil().max(12.0)
    };
    let bold_extra = if bold { (font_size * 0.25).ceil() } else { 0.0 };
    let height_buffer = (font_size * if cjk { 0.3 } else { 0.2 }).ceil().max(8.0);

    TextSize {
        width: (content_width + base_width_buffer + bold_extra).max(MIN_BOX_WIDTH),
        height: (content_height + height_buffer).max(font_size * 1.5),
    }
}

/// True when the text contains CJK ideographs (basic unified block).
fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}
