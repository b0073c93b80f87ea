//! # Engine Integration Tests
//!
//! End-to-end coverage over the builtin font stack and in-memory
//! backgrounds: template editing, single-row renders, batch output and
//! overflow clipping. Assertions are structural (pixel presence and
//! bounds) rather than byte-exact, since raster output depends on the
//! font path in use.

use image::{DynamicImage, Rgba, RgbaImage};
use pergamino::data::{Headers, Row, Value};
use pergamino::render::{render_all, render_native, render_preview};
use pergamino::template::HorizontalAlign;
use pergamino::{FontStack, PergaminoError, TemplateModel};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// A white background at the given native size.
fn white_background(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, 255]),
    ))
}

fn headers(names: &[&str]) -> Headers {
    Headers::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn dark_pixels(image: &RgbaImage) -> usize {
    image.pixels().filter(|p| p.0[0] < 128).count()
}

/// A model with one centered text element holding the given template text.
fn single_element_model(fonts: &FontStack, text: &str) -> TemplateModel {
    let mut model = TemplateModel::new();
    model.set_background(white_background(800, 640));
    let id = model.add_text_element(fonts);
    model.element_mut(id).unwrap().font_size = 24.0;
    model.set_element_text(fonts, id, text);
    model.element_mut(id).unwrap().horizontal_align = HorizontalAlign::Center;
    model.move_element(id, 300.0, 200.0);
    model
}

// ============================================================================
// END-TO-END RENDERING
// ============================================================================

#[test]
fn score_column_renders_dates_and_literals() {
    let fonts = FontStack::builtin();
    let model = single_element_model(&fonts, "{{Score}}");
    let headers = headers(&["Score"]);
    let rows = vec![
        Row::from_iter([("Score", Value::Number(45.0))]),
        Row::from_iter([("Score", Value::Text("N/A".into()))]),
    ];

    let certificates = render_all(&model, &fonts, &headers, &rows).unwrap();
    assert_eq!(certificates.len(), 2);

    // Serial 45 decodes to an early-1900 date, which also names the file.
    assert_eq!(certificates[0].name, "1900-02-13");
    assert_eq!(certificates[1].name, "N/A");

    // Both rows drew text; the ten-character date covers visibly more
    // pixels than the three-character literal.
    let date_ink = dark_pixels(&certificates[0].image);
    let literal_ink = dark_pixels(&certificates[1].image);
    assert!(date_ink > 0 && literal_ink > 0);
    assert!(date_ink > literal_ink);
}

#[test]
fn unresolved_placeholder_renders_literally() {
    let fonts = FontStack::builtin();
    let model = single_element_model(&fonts, "{{Missing}}");
    let headers = headers(&["Name"]);
    let row = Row::from_iter([("Name", "x")]);

    let image = render_native(&model, &fonts, &headers, &row).unwrap();
    // The literal token text is drawn, not an empty box.
    assert!(dark_pixels(&image) > 0);
}

#[test]
fn native_output_matches_background_resolution() {
    let fonts = FontStack::builtin();
    let mut model = TemplateModel::new();
    model.set_background(white_background(640, 480));
    model.add_text_element(&fonts);

    let image = render_native(&model, &fonts, &headers(&["A"]), &Row::new()).unwrap();
    assert_eq!((image.width(), image.height()), (640, 480));
    assert!(dark_pixels(&image) > 0);
}

#[test]
fn preview_is_fitted_into_display_bounds() {
    let fonts = FontStack::builtin();
    let mut model = TemplateModel::new();
    model.set_background(white_background(1600, 1200));
    model.add_text_element(&fonts);

    let image =
        render_preview(&model, &fonts, &headers(&["A"]), &Row::new(), 800, 600).unwrap();
    assert_eq!((image.width(), image.height()), (800, 600));
    assert!(dark_pixels(&image) > 0);
}

#[test]
fn overflowing_text_is_clipped_to_its_box() {
    let fonts = FontStack::builtin();
    let mut model = TemplateModel::new();
    model.set_background(white_background(800, 640));
    let id = model.add_text_element(&fonts);
    model.set_element_text(
        &fonts,
        id,
        "far more text than a tiny box can possibly hold in any layout",
    );
    model.move_element(id, 100.0, 100.0);
    model.resize_element(id, 50.0, 20.0);

    let image = render_native(&model, &fonts, &headers(&["A"]), &Row::new()).unwrap();

    // Edit-space equals native-space here (ratio 1), so every inked pixel
    // must sit inside the 50x20 box at (100, 100).
    for (x, y, p) in image.enumerate_pixels() {
        if p.0[0] < 128 {
            assert!(
                (100..150).contains(&x) && (100..120).contains(&y),
                "pixel ({x}, {y}) drawn outside the clip box"
            );
        }
    }
}

// ============================================================================
// BATCH DRIVER
// ============================================================================

#[test]
fn batch_preserves_row_order() {
    let fonts = FontStack::builtin();
    let model = single_element_model(&fonts, "{{Name}}");
    let headers = headers(&["Name"]);
    let rows: Vec<Row> = ["ana", "bruno", "carla"]
        .iter()
        .map(|n| Row::from_iter([("Name", *n)]))
        .collect();

    let certificates = render_all(&model, &fonts, &headers, &rows).unwrap();
    let names: Vec<&str> = certificates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ana", "bruno", "carla"]);
}

#[test]
fn empty_batch_yields_empty_output() {
    let fonts = FontStack::builtin();
    let model = single_element_model(&fonts, "{{Name}}");
    let certificates = render_all(&model, &fonts, &headers(&["Name"]), &[]).unwrap();
    assert!(certificates.is_empty());
}

#[test]
fn empty_name_values_fall_back_to_ordinals() {
    let fonts = FontStack::builtin();
    let model = single_element_model(&fonts, "{{Name}}");
    let rows = vec![Row::new(), Row::new()];

    let certificates = render_all(&model, &fonts, &headers(&["Name"]), &rows).unwrap();
    assert_eq!(certificates[0].name, "certificate_1");
    assert_eq!(certificates[1].name, "certificate_2");
}

#[test]
fn missing_background_is_reported_before_rendering() {
    let fonts = FontStack::builtin();
    let mut model = TemplateModel::new();
    model.add_text_element(&fonts);
    let rows = vec![Row::new()];

    let err = render_all(&model, &fonts, &headers(&["Name"]), &rows).unwrap_err();
    assert!(matches!(err, PergaminoError::MissingBackground));

    let err = render_native(&model, &fonts, &headers(&["Name"]), &Row::new()).unwrap_err();
    assert!(matches!(err, PergaminoError::MissingBackground));
}
