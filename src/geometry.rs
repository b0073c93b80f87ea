//! # Geometry and Coordinate Spaces
//!
//! The engine juggles three pixel coordinate systems:
//!
//! - **edit-space**: the on-screen editing canvas, scaled down from the
//!   background image so it fits the editor bounds
//! - **preview-space**: an on-screen render surface, scaled from the
//!   native image to fit a display box
//! - **native-space**: the background image at full resolution, used for
//!   final output
//!
//! Every space relates to the others through a single scalar ratio, so a
//! box moves between spaces by multiplying each coordinate and dimension
//! by `target_scale / source_scale`. No space is ever assumed equal to
//! another; renders always derive their scale from the known ratios.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in some pixel coordinate space.
///
/// Text element boxes, clip regions and surface bounds are all `Rect`s;
/// which space a given rect lives in is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether the point lies inside the rect (right/bottom exclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection of two rects, or a zero-sized rect when disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect {
            x,
            y,
            width: (right - x).max(0.0),
            height: (bottom - y).max(0.0),
        }
    }
}

/// Map a box from one coordinate space into another.
///
/// `source_scale` and `target_scale` are the spaces' scales relative to a
/// common reference; every coordinate and dimension is multiplied by
/// `target_scale / source_scale`. Mapping edit-space to native-space uses
/// `to_target_space(box, edit_scale_ratio, 1.0)`; edit to preview uses
/// `to_target_space(box, edit_scale_ratio, preview_fit)`.
pub fn to_target_space(rect: Rect, source_scale: f32, target_scale: f32) -> Rect {
    let factor = target_scale / source_scale;
    Rect {
        x: rect.x * factor,
        y: rect.y * factor,
        width: rect.width * factor,
        height: rect.height * factor,
    }
}

/// Ratio that fits a `src_w x src_h` surface inside `max_w x max_h` while
/// preserving aspect ratio.
///
/// This single function produces both known ratios: the edit-scale ratio
/// (native image fitted into the edit canvas bounds) and the preview fit
/// (native image fitted into the preview surface bounds).
pub fn fit_ratio(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> f32 {
    if src_w == 0 || src_h == 0 {
        return 1.0;
    }
    let wr = max_w as f32 / src_w as f32;
    let hr = max_h as f32 / src_h as f32;
    wr.min(hr)
}
