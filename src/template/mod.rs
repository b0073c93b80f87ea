//! # Template Model
//!
//! The reusable visual template: a background image plus an ordered
//! collection of positioned text elements. Element order is z-order
//! (insertion order) and is preserved across renders.
//!
//! The model owns element lifecycle (creation, selection, deletion) and
//! enforces the geometry invariants interactive editing relies on. The
//! "selected element" is an id resolved on demand, never a reference into
//! the collection, so deletion cannot leave anything dangling.

mod element;

pub use element::{Color, HorizontalAlign, TextElement, VerticalAlign};

use image::DynamicImage;
use log::debug;

use crate::geometry::fit_ratio;
use crate::text::{FontStack, FontWeight, measure};

/// Edit canvas bounds the background image is fitted into.
pub const EDIT_MAX_WIDTH: u32 = 800;
pub const EDIT_MAX_HEIGHT: u32 = 800;

/// Content and sizing defaults for freshly created elements.
const NEW_ELEMENT_TEXT: &str = "Click to edit";
const NEW_ELEMENT_FONT_SIZE: f32 = 16.0;
/// Width hint generous enough that a fresh element's text never wraps.
const NEW_ELEMENT_WIDTH_HINT: f32 = 1000.0;

/// The decoded background image plus its native pixel dimensions.
#[derive(Debug)]
pub struct Background {
    image: DynamicImage,
    native_width: u32,
    native_height: u32,
}

impl Background {
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn native_width(&self) -> u32 {
        self.native_width
    }

    pub fn native_height(&self) -> u32 {
        self.native_height
    }
}

/// The template: elements, background, edit canvas and scale.
#[derive(Debug)]
pub struct TemplateModel {
    elements: Vec<TextElement>,
    next_element_id: u32,
    selected: Option<u32>,
    background: Option<Background>,
    canvas_width: f32,
    canvas_height: f32,
    edit_scale_ratio: f32,
}

impl Default for TemplateModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateModel {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_element_id: 1,
            selected: None,
            background: None,
            canvas_width: EDIT_MAX_WIDTH as f32,
            canvas_height: EDIT_MAX_HEIGHT as f32,
            edit_scale_ratio: 1.0,
        }
    }

    // ── background ──────────────────────────────────────────────────────

    /// Install the background image and fit the edit canvas around it.
    ///
    /// The native image is fitted into the edit bounds preserving aspect
    /// ratio; the resulting ratio becomes the edit scale every subsequent
    /// render derives its transform from.
    pub fn set_background(&mut self, image: DynamicImage) {
        let (nw, nh) = (image.width(), image.height());
        let ratio = fit_ratio(nw, nh, EDIT_MAX_WIDTH, EDIT_MAX_HEIGHT);
        self.canvas_width = (nw as f32 * ratio).floor();
        self.canvas_height = (nh as f32 * ratio).floor();
        self.edit_scale_ratio = ratio;
        debug!(
            "background {nw}x{nh} fitted to edit canvas {}x{} (ratio {ratio:.4})",
            self.canvas_width, self.canvas_height
        );
        self.background = Some(Background {
            image,
            native_width: nw,
            native_height: nh,
        });
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Edit-canvas over native-image scale, 1.0 until a background is set.
    pub fn edit_scale_ratio(&self) -> f32 {
        self.edit_scale_ratio
    }

    /// Edit canvas dimensions in edit-space pixels.
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    // ── element lifecycle ───────────────────────────────────────────────

    pub fn elements(&self) -> &[TextElement] {
        self.elements.as_slice()
    }

    pub fn element(&self, id: u32) -> Option<&TextElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Mutable access for plain property edits (font size, weight, color,
    /// alignment). Geometry and text changes should go through the
    /// dedicated mutators so their invariants hold.
    pub fn element_mut(&mut self, id: u32) -> Option<&mut TextElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Add a fresh text element with editor defaults and an auto-computed
    /// box. The new element becomes the selection. Returns its id.
    pub fn add_text_element(&mut self, fonts: &FontStack) -> u32 {
        self.push_element(fonts, NEW_ELEMENT_TEXT.to_string(), 50.0, 50.0)
    }

    /// Append a `{{column}}` token to the selected element (re-sizing it),
    /// or create a new element holding just the token when nothing is
    /// selected. Returns the affected element's id.
    pub fn insert_placeholder(&mut self, fonts: &FontStack, column: &str) -> u32 {
        let token = format!("{{{{{column}}}}}");
        if let Some(id) = self.selected
            && let Some(el) = self.elements.iter_mut().find(|e| e.id == id)
        {
            el.text.push_str(&token);
            self.update_element_size(fonts, id);
            return id;
        }
        // Stagger fresh placeholder elements downward so they don't stack.
        let y = 50.0 + self.elements.len() as f32 * 40.0;
        self.push_element(fonts, token, 50.0, y)
    }

    fn push_element(&mut self, fonts: &FontStack, text: String, x: f32, y: f32) -> u32 {
        let size = measure(
            fonts,
            &text,
            NEW_ELEMENT_FONT_SIZE,
            FontWeight::Normal,
            Some(NEW_ELEMENT_WIDTH_HINT),
        );
        let id = self.next_id();
        self.elements.push(TextElement {
            id,
            text,
            x,
            y,
            width: size.width,
            height: size.height,
            font_size: NEW_ELEMENT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            color: Color::BLACK,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Middle,
        });
        self.selected = Some(id);
        id
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_element_id;
        self.next_element_id += 1;
        id
    }

    // ── selection ───────────────────────────────────────────────────────

    /// Select an element by id. Returns false when no such element exists.
    pub fn select(&mut self, id: u32) -> bool {
        if self.element(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The selected element, resolved on demand.
    pub fn selected_element(&self) -> Option<&TextElement> {
        self.selected.and_then(|id| self.element(id))
    }

    /// Remove the selected element and clear the selection. Returns true
    /// when an element was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    // ── interactive geometry ────────────────────────────────────────────

    /// Move an element, clamping the position into the edit canvas the way
    /// the drag interaction does.
    pub fn move_element(&mut self, id: u32, x: f32, y: f32) -> bool {
        let (cw, ch) = (self.canvas_width, self.canvas_height);
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        el.x = x.clamp(0.0, (cw - 100.0).max(0.0));
        el.y = y.clamp(0.0, (ch - 30.0).max(0.0));
        true
    }

    /// Resize an element: the resize handle's 50×20 floor, capped at the
    /// canvas remainder so the box cannot extend past the canvas edge.
    pub fn resize_element(&mut self, id: u32, width: f32, height: f32) -> bool {
        let (cw, ch) = (self.canvas_width, self.canvas_height);
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        el.width = width.max(50.0).min((cw - el.x).max(50.0));
        el.height = height.max(20.0).min((ch - el.y).max(20.0));
        true
    }

    /// Replace an element's text and re-run auto-sizing at its current
    /// width.
    pub fn set_element_text(&mut self, fonts: &FontStack, id: u32, text: impl Into<String>) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        el.text = text.into();
        self.update_element_size(fonts, id)
    }

    /// Recompute an element's box from its content, using the current box
    /// width as the wrap budget (or a default when the box has none yet).
    pub fn update_element_size(&mut self, fonts: &FontStack, id: u32) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let hint = if el.width > 0.0 { el.width } else { 400.0 };
        let size = measure(fonts, &el.text, el.font_size, el.font_weight, Some(hint));
        el.width = size.width;
        el.height = size.height;
        true
    }
}
